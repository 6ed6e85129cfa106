use crate::{Dataset, Lexicon, Suggestion};

/// Canonical card names (front faces only).
pub struct CardIndex(Lexicon);

impl CardIndex {
	pub fn new<I, S>(names: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		Self(Lexicon::new(names))
	}

	pub fn contains(&self, name: &str) -> bool {
		self.0.contains(name)
	}

	pub fn closest(&self, text: &str, max_distance: usize) -> Option<Suggestion<'_>> {
		self.0.closest(text, max_distance)
	}

	pub fn closest_prefix(&self, prefix: &str, budget: usize) -> Option<Suggestion<'_>> {
		self.0.closest_prefix(prefix, budget)
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.0.iter()
	}
}

/// Ability words, keyword abilities/actions and known UI noise.
pub struct KeywordIndex(Lexicon);

impl KeywordIndex {
	pub fn new<I, S>(keywords: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		Self(Lexicon::new(keywords))
	}

	pub fn closest(&self, text: &str, max_distance: usize) -> Option<Suggestion<'_>> {
		self.0.closest(text, max_distance)
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

/// Both reference indexes, built once and only read afterwards.
pub struct Dictionary {
	pub cards: CardIndex,
	pub keywords: KeywordIndex,
}

impl Dictionary {
	pub fn new(dataset: &Dataset) -> Self {
		let dictionary = Self {
			cards: CardIndex::new(&dataset.cards),
			keywords: KeywordIndex::new(&dataset.keywords),
		};
		log::debug!(
			"Built dictionary: {} cards, {} keywords",
			dictionary.cards.len(),
			dictionary.keywords.len()
		);
		dictionary
	}
}

impl From<&Dataset> for Dictionary {
	fn from(dataset: &Dataset) -> Self {
		Self::new(dataset)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn assert_send_sync<T: Send + Sync>() {}

	#[test]
	fn test_dictionary_is_shareable() {
		assert_send_sync::<Dictionary>();
	}

	#[test]
	fn test_dictionary_from_dataset() {
		let dataset = Dataset {
			cards: vec!["Fire".to_string(), "Lightning Bolt".to_string(), "Fire".to_string()],
			keywords: vec!["Flying".to_string(), "Land".to_string()],
		};
		let dictionary = Dictionary::from(&dataset);

		assert_eq!(dictionary.cards.len(), 2);
		assert!(dictionary.cards.contains("Lightning Bolt"));
		assert!(!dictionary.cards.contains("Flying"));
		assert_eq!(dictionary.keywords.len(), 2);
		assert_eq!(dictionary.keywords.closest("Flyinq", 1).map(|s| s.term), Some("Flying"));
	}
}
