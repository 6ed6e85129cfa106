use std::sync::LazyLock;

use regex::Regex;

static NON_NAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z',. ]").expect("regex"));

/// Keep only characters that can appear in a card name, then drop trailing spaces.
pub fn normalize(text: &str) -> String {
    NON_NAME_CHARS
        .replace_all(text, "")
        .trim_end_matches(' ')
        .to_string()
}

/// Remove stray periods left by OCR.
pub fn strip_periods(text: &str) -> String {
    text.replace('.', "").trim_end_matches(' ').to_string()
}
