use serde::{Deserialize, Serialize};

/// Matching tolerances, as fractions of the fragment length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Edit budget for correcting a fragment into a card name.
    pub name_ratio: f64,
    /// Edit budget for recognizing a fragment as a keyword.
    pub keyword_ratio: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name_ratio: 0.3,
            keyword_ratio: 0.2,
        }
    }
}

/// `floor(ratio * len)`, capped at `cap`.
pub(crate) fn budget(ratio: f64, len: usize, cap: usize) -> usize {
    ((ratio * len as f64) as usize).min(cap)
}
