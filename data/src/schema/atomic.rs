use std::collections::BTreeMap;

use serde::{Deserialize, de::IgnoredAny};

pub const URL: &str = "https://mtgjson.com/api/v5/VintageAtomic.json";

/// MTGJSON "Atomic" file: card objects keyed by (full) card name.
///
/// Only the keys are needed, so the card objects themselves are skipped.
/// The map is ordered, which fixes the enumeration order of the card index.
#[derive(Deserialize)]
pub struct AtomicCards {
	pub data: BTreeMap<String, IgnoredAny>,
}

// {
// 	"meta": { "date": "2024-05-01", "version": "5.2.2+20240501" },
// 	"data": {
// 		"Fire // Ice": [ { "name": "Fire // Ice", "faceName": "Fire", ... }, ... ],
// 		"Lightning Bolt": [ { "name": "Lightning Bolt", ... } ],
// 		...
// 	}
// }
