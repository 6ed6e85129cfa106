//! Stack-count labels ("x4", "4x") and the card each one belongs to.

use std::collections::HashSet;

use serde::Serialize;

use crate::{BoxTextList, Point};

pub const MULTIPLIER_GLYPHS: [char; 3] = ['×', 'x', 'X'];

/// How a label looks for its card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Nearest {
    /// Closest card box in any direction (`x4`).
    Unconstrained,
    /// Closest card box that is neither right of nor below the label (`4x`).
    UpLeft,
}

impl Nearest {
    fn admits(self, candidate: Point, label: Point) -> bool {
        match self {
            Self::Unconstrained => true,
            Self::UpLeft => candidate.x <= label.x && candidate.y <= label.y,
        }
    }

    /// Index of the admitted card box closest to `label`; the first one on ties.
    pub fn find(self, label: Point, cards: &BoxTextList) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (i, card) in cards.iter().enumerate() {
            let origin = card.bbox.origin();
            if !self.admits(origin, label) {
                continue;
            }
            let dist = origin.dist2(label);
            if best.is_none_or(|(_, b)| dist < b) {
                best = Some((i, dist));
            }
        }
        best.map(|(i, _)| i)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackLabel {
    pub count: u32,
    pub nearest: Nearest,
}

/// Parse a raw two-character fragment made of a multiplier glyph and a digit.
pub fn parse_label(text: &str) -> Option<StackLabel> {
    let mut chars = text.chars();
    let (first, second) = (chars.next()?, chars.next()?);
    if chars.next().is_some() {
        return None;
    }

    let is_glyph = |c: char| MULTIPLIER_GLYPHS.contains(&c);
    let (digit, nearest) = if is_glyph(first) {
        (second, Nearest::Unconstrained)
    } else if is_glyph(second) {
        (first, Nearest::UpLeft)
    } else {
        return None;
    };

    digit.to_digit(10).map(|count| StackLabel { count, nearest })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Target {
    /// Position in the resolved card list.
    pub index: usize,
    pub card: String,
    /// Count the card had before this label.
    pub previous: u32,
}

/// One stack label and where it went.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    pub label: String,
    pub count: u32,
    pub nearest: Nearest,
    pub target: Option<Target>,
}

/// Overwrite card counts from the stack labels found in `box_texts`.
///
/// `box_texts` is the full, unfiltered scan; labels are applied in its order,
/// so when two labels pick the same card the later one wins.
pub fn assign_stacked(box_texts: &BoxTextList, box_cards: &mut BoxTextList) -> Vec<Assignment> {
    let mut assignments = Vec::new();
    let mut claimed = HashSet::new();

    for box_text in box_texts {
        let Some(label) = parse_label(&box_text.text) else {
            continue;
        };
        let origin = box_text.bbox.origin();

        let target = label.nearest.find(origin, box_cards).map(|index| {
            let card = &mut box_cards[index];
            let previous = std::mem::replace(&mut card.n, label.count);
            if !claimed.insert(index) {
                log::warn!("{} claimed by several stack labels, now x{} (was x{previous})", card.text, label.count);
            } else {
                log::info!("{} assigned to x{}", card.text, label.count);
            }
            Target {
                index,
                card: card.text.clone(),
                previous,
            }
        });
        if target.is_none() {
            log::warn!("No card for stack label {:?} at ({}, {})", box_text.text, origin.x, origin.y);
        }

        assignments.push(Assignment {
            label: box_text.text.clone(),
            count: label.count,
            nearest: label.nearest,
            target,
        });
    }

    assignments
}
