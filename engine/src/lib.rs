use std::sync::Arc;

use data::Dictionary;
use rayon::prelude::*;

mod boxtext;
pub use boxtext::*;
mod config;
pub use config::Config;
mod decision;
pub use decision::Decision;
pub mod deck;
pub use deck::{Deck, Pile};
pub mod keyword;
pub mod resolver;
pub use resolver::{Resolution, Resolver};
pub mod stacked;
pub use stacked::Assignment;
pub mod text;

/// Everything one scan produced, for use and for auditing.
#[derive(Debug, Clone)]
pub struct Scan {
	pub deck: Deck,
	/// Resolved card boxes with their final counts, in scan order.
	pub cards: BoxTextList,
	/// One entry per input box, in scan order.
	pub decisions: Vec<Decision>,
	pub assignments: Vec<Assignment>,
}

/// Turns detected text boxes into a deck.
///
/// Cheap to clone; the dictionary is shared.
#[derive(Clone)]
pub struct Recognition {
	dictionary: Arc<Dictionary>,
	config: Config,
}

impl Recognition {
	pub fn new(dictionary: Arc<Dictionary>, config: Config) -> Self {
		Self { dictionary, config }
	}

	pub fn config(&self) -> Config {
		self.config
	}

	pub fn dictionary(&self) -> &Dictionary {
		&self.dictionary
	}

	pub fn resolver(&self) -> Resolver<'_> {
		Resolver::new(&self.dictionary.cards, self.config.name_ratio)
	}

	/// Normalize a raw fragment and decide whether it is a card.
	pub fn classify(&self, raw: &str) -> Decision {
		let text = text::normalize(raw);
		if let Some(found) = keyword::find_keyword(&self.dictionary.keywords, &text, self.config.keyword_ratio) {
			return Decision::KeywordRejected {
				keyword: found.term.to_string(),
				distance: found.distance,
				text,
			};
		}

		let resolution = self.resolver().resolve(&text);
		Decision::Resolved { text, resolution }
	}

	/// Resolve every box independently; the output keeps the input order.
	pub fn box_texts_to_cards(&self, box_texts: &BoxTextList) -> (BoxTextList, Vec<Decision>) {
		let decisions = box_texts[..]
			.par_iter()
			.map(|box_text| self.classify(&box_text.text))
			.collect::<Vec<_>>();

		for decision in &decisions {
			log::info!("{decision}");
		}

		let box_cards = box_texts
			.iter()
			.zip(&decisions)
			.filter_map(|(box_text, decision)| {
				decision.card().map(|card| BoxText::new(box_text.bbox, card))
			})
			.collect();

		(box_cards, decisions)
	}

	/// Sort, resolve, apply stack labels and split into maindeck and sideboard.
	pub fn box_texts_to_deck(&self, mut box_texts: BoxTextList) -> Scan {
		box_texts.sort();
		let (mut cards, decisions) = self.box_texts_to_cards(&box_texts);
		let assignments = stacked::assign_stacked(&box_texts, &mut cards);
		let deck = deck::assemble(&cards);

		Scan {
			deck,
			cards,
			decisions,
			assignments,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn recognition(cards: &[&str]) -> Recognition {
		let dataset = data::Dataset::from_sources(
			cards.iter().copied(),
			vec![vec!["Flying".to_string(), "First strike".to_string(), "Landfall".to_string()]],
		);
		Recognition::new(Arc::new(Dictionary::new(&dataset)), Config::default())
	}

	#[test]
	fn test_single_stack() {
		let recognition = recognition(&["Lightning Bolt", "Opt"]);
		let mut box_texts = BoxTextList::new();
		box_texts.add(Geometry::point(0.0, 5.0), "x4");
		box_texts.add(Geometry::point(0.0, 0.0), "Lightning Bolt");

		let scan = recognition.box_texts_to_deck(box_texts);

		assert_eq!(scan.deck.maindeck, Pile::from_iter([("Lightning Bolt", 4)]));
		assert!(scan.deck.sideboard.is_empty());
		assert_eq!(scan.assignments.len(), 1);
	}

	#[test]
	fn test_keyword_takes_precedence() {
		// "Flying" is also a card name here; the keyword filter still wins.
		let recognition = recognition(&["Flying", "Opt"]);
		let decision = recognition.classify("Flying");
		assert_eq!(
			decision,
			Decision::KeywordRejected {
				text: "Flying".to_string(),
				keyword: "Flying".to_string(),
				distance: 0,
			}
		);

		let box_texts = BoxTextList::from(vec![BoxText::new(Geometry::point(0.0, 0.0), "Flying")]);
		let (cards, decisions) = recognition.box_texts_to_cards(&box_texts);
		assert!(cards.is_empty());
		assert_eq!(decisions.len(), 1);
	}

	#[test]
	fn test_ui_tokens_are_rejected() {
		let recognition = recognition(&["Island"]);
		assert!(matches!(recognition.classify("Display"), Decision::KeywordRejected { .. }));
		assert!(matches!(recognition.classify("Search"), Decision::KeywordRejected { .. }));
	}

	#[test]
	fn test_classify_normalizes_first() {
		let recognition = recognition(&["Lightning Bolt"]);
		assert_eq!(recognition.classify("1 Lightning Bolt 2").card(), Some("Lightning Bolt"));
		assert_eq!(recognition.classify("x4").text(), "x");
	}

	#[test]
	fn test_noise_is_dropped_and_audited() {
		let recognition = recognition(&["Lightning Bolt", "Snapcaster Mage", "Opt"]);
		let box_texts = BoxTextList::from(vec![
			BoxText::new(Geometry::point(0.0, 0.0), "Snapcastor Mage"),
			BoxText::new(Geometry::point(0.0, 10.0), "Flyinq"),
			BoxText::new(Geometry::point(0.0, 20.0), "Deals 3 damage to any target. That's a lot."),
			BoxText::new(Geometry::point(0.0, 30.0), "Lightn.."),
			BoxText::new(Geometry::point(0.0, 40.0), "Op"),
		]);

		let scan = recognition.box_texts_to_deck(box_texts);

		let cards = scan.cards.iter().map(|v| v.text.as_str()).collect::<Vec<_>>();
		assert_eq!(cards, vec!["Snapcaster Mage", "Lightning Bolt"]);
		assert_eq!(scan.decisions.len(), 5);
		assert!(matches!(scan.decisions[1], Decision::KeywordRejected { .. }));
		assert_eq!(
			scan.decisions[2],
			Decision::Resolved {
				text: "Deals  damage to any target. That's a lot.".to_string(),
				resolution: Resolution::TooLong,
			}
		);
		assert_eq!(
			scan.decisions[4],
			Decision::Resolved { text: "Op".to_string(), resolution: Resolution::TooShort }
		);
		assert_eq!(scan.deck.maindeck.total(), 2);
	}

	#[test]
	fn test_resolved_cards_follow_scan_order() {
		let recognition = recognition(&["Opt", "Ponder", "Brainstorm"]);
		let box_texts = BoxTextList::from(vec![
			BoxText::new(Geometry::point(0.0, 30.0), "Opt"),
			BoxText::new(Geometry::point(200.0, 0.0), "Ponder"),
			BoxText::new(Geometry::point(0.0, 0.0), "Brainstorm"),
		]);

		let scan = recognition.box_texts_to_deck(box_texts);

		let cards = scan.cards.iter().map(|v| v.text.as_str()).collect::<Vec<_>>();
		assert_eq!(cards, vec!["Brainstorm", "Ponder", "Opt"]);
	}

	#[test]
	fn test_sixty_five_cards_split() {
		let recognition = recognition(&["Island", "Opt", "Ponder", "Brainstorm"]);
		let mut rows = vec![("Island", "x9"); 5];
		rows.extend([("Opt", "x4"), ("Ponder", "x4"), ("Brainstorm", "x4"), ("Opt", "x8")]);

		let mut box_texts = BoxTextList::new();
		for (i, (card, label)) in rows.into_iter().enumerate() {
			let y = i as f32 * 10.0;
			box_texts.add(Geometry::point(0.0, y), card);
			box_texts.add(Geometry::point(0.0, y + 1.0), label);
		}

		let scan = recognition.box_texts_to_deck(box_texts);

		assert_eq!(scan.cards.total(), 65);
		assert_eq!(scan.deck.maindeck.total(), 60);
		assert_eq!(scan.deck.sideboard.total(), 5);
		// 45 Island, 4 Opt, 4 Ponder, 4 Brainstorm make 57; the last Opt stack splits 3/5.
		assert_eq!(scan.deck.maindeck.get("Island"), 45);
		assert_eq!(scan.deck.maindeck.get("Opt"), 7);
		assert_eq!(scan.deck.sideboard.get("Opt"), 5);
	}
}
