use std::fmt;

use crate::resolver::Resolution;

/// What happened to one fragment of a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// The fragment reads as a keyword or UI term; it never reached card lookup.
    KeywordRejected {
        text: String,
        keyword: String,
        distance: usize,
    },
    Resolved {
        text: String,
        resolution: Resolution,
    },
}

impl Decision {
    /// Normalized text of the fragment.
    pub fn text(&self) -> &str {
        match self {
            Self::KeywordRejected { text, .. } | Self::Resolved { text, .. } => text,
        }
    }

    pub fn card(&self) -> Option<&str> {
        match self {
            Self::KeywordRejected { .. } => None,
            Self::Resolved { resolution, .. } => resolution.card(),
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KeywordRejected { text, keyword, distance } => {
                write!(f, "Keyword rejected: {text:?} ~ {keyword} ({distance})")
            }
            Self::Resolved { text, resolution } => write!(f, "{resolution} <- {text:?}"),
        }
    }
}
