//! Splits free text into lowercase keyword candidates.
//!
//! A token is a maximal run of ASCII letters, at least [`MIN_TOKEN_LEN`]
//! long. Everything else, including digits and non-ASCII letters, only
//! separates tokens and is dropped.

use regex::Regex;
use std::sync::LazyLock;

/// Shortest run of letters kept as a token.
pub const MIN_TOKEN_LEN: usize = 3;

static WORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("[A-Za-z]{{{},}}", MIN_TOKEN_LEN)).expect("static token pattern is valid")
});

/// Lazily tokenize `text`, left to right.
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    WORD_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().to_ascii_lowercase())
}
