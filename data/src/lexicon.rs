use lasso::{Rodeo, RodeoReader};

/// A term found by a bounded lookup, borrowed from the lexicon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Suggestion<'a> {
	pub term: &'a str,
	pub distance: usize,
}

/// Immutable, deduplicated term list with edit-distance lookups.
///
/// Terms are enumerated in insertion order (the interner hands out keys
/// sequentially), so every lookup that has to break a tie keeps the term that
/// was inserted first.
pub struct Lexicon {
	strings: RodeoReader,
	lengths: Vec<usize>,
}

impl Lexicon {
	pub fn new<I, S>(terms: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut strings = Rodeo::new();
		for term in terms {
			strings.get_or_intern(term.as_ref());
		}
		let strings = strings.into_reader();
		let lengths = strings
			.strings()
			.map(|term| term.chars().count())
			.collect();

		Self { strings, lengths }
	}

	pub fn contains(&self, term: &str) -> bool {
		self.strings.contains(term)
	}

	pub fn len(&self) -> usize {
		self.strings.len()
	}

	pub fn is_empty(&self) -> bool {
		self.strings.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.strings.strings()
	}

	/// Closest term within `max_distance` edits of `text`.
	///
	/// Among terms at the minimal distance the earliest one wins.
	pub fn closest(&self, text: &str, max_distance: usize) -> Option<Suggestion<'_>> {
		let text_len = text.chars().count();
		let mut best: Option<Suggestion<'_>> = None;

		for (term, &len) in self.strings.strings().zip(&self.lengths) {
			// The length gap is a lower bound on the distance.
			let gap = len.abs_diff(text_len);
			match best {
				Some(b) if gap >= b.distance => continue,
				None if gap > max_distance => continue,
				_ => {}
			}

			let distance = levenshtein::levenshtein(text, term);
			if distance > max_distance {
				continue;
			}
			if best.is_none_or(|b| distance < b.distance) {
				best = Some(Suggestion { term, distance });
				if distance == 0 {
					break;
				}
			}
		}

		best
	}

	/// Closest term when only the first `prefix.chars().count()` characters of
	/// each term are compared against `prefix`.
	///
	/// A term is only accepted when its distance is strictly below the running
	/// budget, which starts at `budget` and shrinks to the best distance found.
	pub fn closest_prefix(&self, prefix: &str, budget: usize) -> Option<Suggestion<'_>> {
		let width = prefix.chars().count();
		let mut budget = budget;
		let mut best = None;

		for (term, &len) in self.strings.strings().zip(&self.lengths) {
			if budget == 0 {
				break;
			}
			if width.saturating_sub(len) >= budget {
				continue;
			}

			let distance = levenshtein::levenshtein(prefix, head(term, width));
			if distance < budget {
				budget = distance;
				best = Some(Suggestion { term, distance });
			}
		}

		best
	}
}

/// The first `n` characters of `s` (all of it when shorter).
pub(crate) fn head(s: &str, n: usize) -> &str {
	match s.char_indices().nth(n) {
		Some((index, _)) => &s[..index],
		None => s,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn lexicon() -> Lexicon {
		Lexicon::new(["Island", "Islet", "Isle of Vesuva", "Lightning Bolt", "Island"])
	}

	#[test]
	fn test_dedup_keeps_first_order() {
		let lexicon = lexicon();
		assert_eq!(lexicon.len(), 4);
		assert_eq!(
			lexicon.iter().collect::<Vec<_>>(),
			vec!["Island", "Islet", "Isle of Vesuva", "Lightning Bolt"]
		);
	}

	#[test]
	fn test_closest_exact() {
		let lexicon = lexicon();
		assert_eq!(
			lexicon.closest("Islet", 2),
			Some(Suggestion { term: "Islet", distance: 0 })
		);
	}

	#[test]
	fn test_closest_within_bound() {
		let lexicon = lexicon();
		assert_eq!(
			lexicon.closest("Lightnirg Bolt", 2),
			Some(Suggestion { term: "Lightning Bolt", distance: 1 })
		);
		assert_eq!(lexicon.closest("Lightnxxx Bolt", 2), None);
	}

	#[test]
	fn test_closest_tie_keeps_earliest() {
		// "Islax" is one substitution away from both terms.
		let lexicon = Lexicon::new(["Islat", "Islbx"]);
		assert_eq!(
			lexicon.closest("Islax", 1),
			Some(Suggestion { term: "Islat", distance: 1 })
		);
	}

	#[test]
	fn test_closest_prefix_strictly_below_budget() {
		let lexicon = lexicon();
		// Exact prefix: distance 0 < 1.
		assert_eq!(
			lexicon.closest_prefix("Ligh", 1),
			Some(Suggestion { term: "Lightning Bolt", distance: 0 })
		);
		// Budget 0 never accepts anything.
		assert_eq!(lexicon.closest_prefix("Isl", 0), None);
	}

	#[test]
	fn test_closest_prefix_tie_keeps_earliest() {
		let lexicon = lexicon();
		// "Island", "Islet" and "Isle of Vesuva" all share the prefix "Isl".
		assert_eq!(
			lexicon.closest_prefix("Isl", 1),
			Some(Suggestion { term: "Island", distance: 0 })
		);
	}

	#[test]
	fn test_closest_prefix_shorter_term() {
		let lexicon = Lexicon::new(["Opt", "Ponder"]);
		// "Opt" is shorter than the prefix and is compared whole.
		assert_eq!(
			lexicon.closest_prefix("Opts", 2),
			Some(Suggestion { term: "Opt", distance: 1 })
		);
	}

	#[test]
	fn test_head() {
		assert_eq!(head("Æther Vial", 3), "Æth");
		assert_eq!(head("Opt", 10), "Opt");
	}
}
