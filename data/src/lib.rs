use std::{
	fs::File,
	io::{BufReader, BufWriter, Read, Write},
	path::{Path, PathBuf},
};

use anyhow::{Context, Result};

mod error;
pub use error::Error;
mod index;
pub use index::{CardIndex, Dictionary, KeywordIndex};
mod lexicon;
pub use lexicon::{Lexicon, Suggestion};
pub mod schema;

/// Separator between the faces of split, flip and double-faced cards.
pub const FACE_SEPARATOR: &str = " //";

/// UI strings that show up on decklist screenshots and would otherwise be
/// corrected into card names.
pub const UI_TOKENS: [&str; 4] = ["Display", "Land", "Search", "Profile"];

// Atomic files are far above ureq's default body limit.
const BODY_LIMIT: u64 = 512 * 1024 * 1024;

/// Reference data in the shape it is cached on disk.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Dataset {
	/// Front-face card names, in index order.
	pub cards: Vec<String>,
	/// Flattened keyword categories followed by [`UI_TOKENS`].
	pub keywords: Vec<String>,
}

impl Dataset {
	/// Build from raw card names and keyword categories.
	pub fn from_sources<C, S, K>(cards: C, keyword_categories: K) -> Self
	where
		C: IntoIterator<Item = S>,
		S: AsRef<str>,
		K: IntoIterator<Item = Vec<String>>,
	{
		let cards = cards
			.into_iter()
			.map(|name| front_face(name.as_ref()).to_string())
			.collect();

		let mut keywords = keyword_categories
			.into_iter()
			.flatten()
			.collect::<Vec<_>>();
		keywords.extend(UI_TOKENS.iter().map(|v| v.to_string()));

		Self { cards, keywords }
	}

	/// Parse MTGJSON Atomic and Keywords documents (e.g. local downloads).
	pub fn from_readers(cards: impl Read, keywords: impl Read) -> Result<Self> {
		let cards: schema::atomic::AtomicCards =
			serde_json::from_reader(BufReader::new(cards)).context("Parse cards JSON")?;
		let keywords: schema::keywords::Keywords =
			serde_json::from_reader(BufReader::new(keywords)).context("Parse keywords JSON")?;

		Ok(Self::from_sources(cards.data.into_keys(), keywords.data.into_values()))
	}

	pub fn from_files(cards: impl AsRef<Path>, keywords: impl AsRef<Path>) -> Result<Self> {
		let (cards, keywords) = (cards.as_ref(), keywords.as_ref());
		let cards = File::open(cards).with_context(|| format!("Open {}", cards.display()))?;
		let keywords = File::open(keywords).with_context(|| format!("Open {}", keywords.display()))?;
		Self::from_readers(cards, keywords)
	}

	pub fn default_cache_path() -> Option<PathBuf> {
		dirs::cache_dir().map(|p| p.join("deckscan").join("dataset.json"))
	}

	pub fn load_cache(path: &Path) -> Result<Self> {
		let file = File::open(path).with_context(|| format!("Open cache {}", path.display()))?;
		let reader = BufReader::new(file);
		let data: Self = serde_json::from_reader(reader).with_context(|| format!("Parse cache {}", path.display()))?;
		Ok(data)
	}

	pub fn save_cache(&self, path: &Path) -> Result<()> {
		if let Some(parent) = path.parent() {
			std::fs::create_dir_all(parent).with_context(|| format!("Create cache dir {}", parent.display()))?;
		}

		let tmp = path.with_extension("json.tmp");
		let file = File::create(&tmp).with_context(|| format!("Write cache temp {}", tmp.display()))?;
		let mut writer = BufWriter::new(file);
		serde_json::to_writer(&mut writer, self).context("Serialize cache")?;
		writer.flush().context("Flush cache")?;

		// Replace existing file (Windows-friendly).
		if std::fs::rename(&tmp, path).is_err() {
			let _ = std::fs::remove_file(path);
			std::fs::rename(&tmp, path).with_context(|| format!("Persist cache {}", path.display()))?;
		}
		Ok(())
	}

	pub fn fetch_remote() -> Result<Self> {
		log::info!("Loading {}", schema::atomic::URL);
		let mut res = ureq::get(schema::atomic::URL)
			.call()
			.context("GET cards")?;
		let cards = res
			.body_mut()
			.with_config()
			.limit(BODY_LIMIT)
			.read_json::<schema::atomic::AtomicCards>()
			.context("Decode cards JSON")?;

		log::info!("Loading {}", schema::keywords::URL);
		let mut res = ureq::get(schema::keywords::URL)
			.call()
			.context("GET keywords")?;
		let keywords = res
			.body_mut()
			.read_json::<schema::keywords::Keywords>()
			.context("Decode keywords JSON")?;

		Ok(Self::from_sources(cards.data.into_keys(), keywords.data.into_values()))
	}

	/// Load the dataset for a run.
	///
	/// Unless `refresh` is set, a readable cache is used as is. Otherwise the
	/// dataset is downloaded and the cache rewritten; on network failure the
	/// cache is the fallback. Fails only when neither source works.
	pub fn try_populated(cache: Option<&Path>, refresh: bool) -> std::result::Result<Self, Error> {
		let cache = cache.map(Path::to_path_buf).or_else(Self::default_cache_path);
		let load_cache = || {
			cache
				.as_deref()
				.context("No cache_dir available")
				.and_then(Self::load_cache)
		};

		if !refresh {
			match load_cache() {
				Ok(data) => return Ok(data),
				Err(err) => log::info!("No usable dataset cache, downloading: {err:#}"),
			}
		}

		match Self::fetch_remote() {
			Ok(data) => {
				if let Some(path) = &cache
					&& let Err(err) = data.save_cache(path)
				{
					log::warn!("Failed to write dataset cache: {err:#}");
				}
				Ok(data)
			}
			Err(remote) => match load_cache() {
				Ok(cached) => {
					log::warn!("Using cached dataset due to network error: {remote:#}");
					Ok(cached)
				}
				Err(cache) => Err(Error::DictionaryUnavailable { remote, cache }),
			},
		}
	}
}

/// Name of the front face of a (possibly multi-faced) card.
pub fn front_face(name: &str) -> &str {
	match name.find(FACE_SEPARATOR) {
		Some(index) => &name[..index],
		None => name,
	}
}
