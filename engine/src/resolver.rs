//! Card name resolution.
//!
//! A normalized fragment goes through three paths, in order:
//!
//! 1. exact membership in the card index,
//! 2. prefix matching when OCR marked the name as truncated (`..`),
//! 3. bounded fuzzy matching otherwise.
//!
//! Every outcome, including the failures, is a [`Resolution`] so callers can
//! audit why a fragment was kept or dropped.

use std::fmt;

use data::CardIndex;

use crate::{config::budget, text};

/// Shorter fragments are too ambiguous to match.
pub const MIN_LEN: usize = 3;
/// Longer fragments are rules text rather than names.
pub const MAX_LEN: usize = 30;
/// What OCR prints in place of the end of a cut-off name.
pub const TRUNCATION_MARKER: &str = "..";
/// Cap on fuzzy corrections, whatever the ratio.
pub const MAX_NAME_DISTANCE: usize = 6;
/// A fragment must be shorter than the corrected name plus this.
pub const LENGTH_SLACK: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    TooShort,
    TooLong,
    Exact(String),
    Prefix { card: String, distance: usize },
    NotPrefix,
    Corrected { card: String, distance: usize },
    /// The closest card failed the length check.
    NotCorrected { card: String, distance: usize },
    NotFound,
}

impl Resolution {
    /// The resolved card, for the outcomes that produce one.
    pub fn card(&self) -> Option<&str> {
        match self {
            Self::Exact(card) | Self::Prefix { card, .. } | Self::Corrected { card, .. } => Some(card),
            _ => None,
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort => write!(f, "Too short"),
            Self::TooLong => write!(f, "Too long"),
            Self::Exact(card) => write!(f, "Exact: {card}"),
            Self::Prefix { card, distance } => write!(f, "Found prefix: {card} ({distance})"),
            Self::NotPrefix => write!(f, "Not prefix"),
            Self::Corrected { card, distance } => write!(f, "Corrected: {card} ({distance})"),
            Self::NotCorrected { card, distance } => write!(f, "Not corrected (too long): {card} ({distance})"),
            Self::NotFound => write!(f, "Not found"),
        }
    }
}

pub struct Resolver<'a> {
    cards: &'a CardIndex,
    name_ratio: f64,
}

impl<'a> Resolver<'a> {
    pub fn new(cards: &'a CardIndex, name_ratio: f64) -> Self {
        Self { cards, name_ratio }
    }

    /// Resolve a normalized fragment to a canonical card name.
    pub fn resolve(&self, text: &str) -> Resolution {
        let len = text.chars().count();
        if len < MIN_LEN {
            return Resolution::TooShort;
        }
        if len > MAX_LEN {
            return Resolution::TooLong;
        }
        if self.cards.contains(text) {
            return Resolution::Exact(text.to_string());
        }

        match text.find(TRUNCATION_MARKER) {
            Some(index) => self.resolve_truncated(&text[..index]),
            None => self.resolve_fuzzy(&text::strip_periods(text)),
        }
    }

    fn resolve_truncated(&self, prefix: &str) -> Resolution {
        let budget = budget(self.name_ratio, prefix.chars().count(), usize::MAX);
        match self.cards.closest_prefix(prefix, budget) {
            Some(found) => Resolution::Prefix {
                card: found.term.to_string(),
                distance: found.distance,
            },
            None => Resolution::NotPrefix,
        }
    }

    fn resolve_fuzzy(&self, text: &str) -> Resolution {
        let len = text.chars().count();
        let max_distance = budget(self.name_ratio, len, MAX_NAME_DISTANCE);
        let Some(found) = self.cards.closest(text, max_distance) else {
            return Resolution::NotFound;
        };

        let card = found.term.to_string();
        let distance = found.distance;
        if fits_length(len, found.term.chars().count()) {
            Resolution::Corrected { card, distance }
        } else {
            Resolution::NotCorrected { card, distance }
        }
    }
}

/// Whether a fragment of `text_len` chars may stand for a name of `card_len` chars.
pub fn fits_length(text_len: usize, card_len: usize) -> bool {
    text_len < card_len + LENGTH_SLACK
}
