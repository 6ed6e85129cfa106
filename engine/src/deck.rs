use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::BoxText;

/// The maindeck always gets at least this many cards when there are enough.
pub const MIN_MAINDECK: u32 = 60;
/// Cards beyond `total - SIDEBOARD_TAIL` go to the sideboard in large scans.
pub const SIDEBOARD_TAIL: u32 = 15;

/// Card name to number of copies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pile {
    cards: BTreeMap<String, u32>,
}

impl Pile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add copies of a card. Zero copies of an absent card add no entry.
    pub fn add(&mut self, card: &str, copies: u32) {
        if let Some(n) = self.cards.get_mut(card) {
            *n += copies;
        } else if copies > 0 {
            self.cards.insert(card.to_string(), copies);
        }
    }

    pub fn get(&self, card: &str) -> u32 {
        self.cards.get(card).copied().unwrap_or(0)
    }

    /// Total number of cards.
    pub fn total(&self) -> u32 {
        self.cards.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.cards.iter().map(|(card, &n)| (card.as_str(), n))
    }

    /// Number of copies that differ between the two piles.
    pub fn diff(&self, other: &Pile) -> u32 {
        let missing = self.iter().map(|(card, n)| n.abs_diff(other.get(card)));
        let extra = other
            .iter()
            .filter(|(card, _)| !self.cards.contains_key(*card))
            .map(|(_, n)| n);
        missing.chain(extra).sum()
    }
}

impl<S: AsRef<str>> FromIterator<(S, u32)> for Pile {
    fn from_iter<I: IntoIterator<Item = (S, u32)>>(iter: I) -> Self {
        let mut pile = Pile::new();
        for (card, n) in iter {
            pile.add(card.as_ref(), n);
        }
        pile
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    pub maindeck: Pile,
    pub sideboard: Pile,
}

impl Deck {
    pub fn total(&self) -> u32 {
        self.maindeck.total() + self.sideboard.total()
    }

    /// Number of copies that differ from `other`, maindeck and sideboard apart.
    pub fn diff(&self, other: &Deck) -> u32 {
        self.maindeck.diff(&other.maindeck) + self.sideboard.diff(&other.sideboard)
    }

    /// [`Deck::diff`] relative to the size of the `expected` deck.
    pub fn error_ratio(&self, expected: &Deck) -> f64 {
        self.diff(expected) as f64 / expected.total().max(1) as f64
    }
}

/// Last scan position (1-based, in cards) that still belongs to the maindeck.
pub fn last_main_card(total: u32) -> u32 {
    MIN_MAINDECK.max(total.saturating_sub(SIDEBOARD_TAIL))
}

/// Split counted cards, in scan order, into maindeck and sideboard.
///
/// Decklists are laid out maindeck first, so the split is purely positional:
/// the first [`last_main_card`] copies are maindeck, the rest sideboard.
pub fn assemble(box_cards: &[BoxText]) -> Deck {
    let total = box_cards.iter().map(|v| v.n).sum();
    let last_main_card = last_main_card(total);

    let mut deck = Deck::default();
    let mut added = 0u32;
    for BoxText { text: card, n, .. } in box_cards {
        let main = (*n).min(last_main_card.saturating_sub(added));
        deck.maindeck.add(card, main);
        deck.sideboard.add(card, n - main);
        added += n;
    }
    deck
}
