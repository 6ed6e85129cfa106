use data::{KeywordIndex, Suggestion};

use crate::config::budget;

/// Keyword matches are never allowed more than this many edits.
pub const MAX_KEYWORD_DISTANCE: usize = 3;

/// Keyword (or UI term) that `text` is a noisy reading of, if any.
///
/// `text` is expected to be normalized already.
pub fn find_keyword<'a>(keywords: &'a KeywordIndex, text: &str, ratio: f64) -> Option<Suggestion<'a>> {
    let max_distance = budget(ratio, text.chars().count(), MAX_KEYWORD_DISTANCE);
    keywords.closest(text, max_distance)
}
