use std::collections::BTreeMap;

use serde::Deserialize;

pub const URL: &str = "https://mtgjson.com/api/v5/Keywords.json";

/// MTGJSON keyword file: `abilityWords`, `keywordAbilities`, `keywordActions`.
#[derive(Deserialize)]
pub struct Keywords {
	pub data: BTreeMap<String, Vec<String>>,
}
