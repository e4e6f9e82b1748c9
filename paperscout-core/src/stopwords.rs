//! Stopword table and filter for keyword candidates.

use std::collections::HashSet;

/// Common English words and terms that appear in nearly every abstract.
///
/// All entries are lowercase; tokens are lowercased before lookup.
pub const DEFAULT_STOPWORDS: &[&str] = &[
    "the", "and", "for", "with", "that", "this", "from", "are", "was", "were", "been", "have",
    "has", "had", "not", "but", "its", "our", "their", "these", "those", "which", "such", "can",
    "into", "than", "also", "more", "most", "other", "some", "each", "both", "all", "any", "using",
    "used", "use", "based", "via", "new", "two", "one", "show", "shows", "results", "paper",
    "propose", "proposed", "approach", "method", "methods", "model", "models", "data", "study",
    "work",
];

/// An immutable set of stopwords, built once and passed to the filter.
#[derive(Debug, Clone)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl Default for StopwordSet {
    fn default() -> Self {
        Self::new()
    }
}

impl StopwordSet {
    /// The built-in table.
    pub fn new() -> Self {
        Self::from_words(DEFAULT_STOPWORDS.iter().copied())
    }

    /// The built-in table plus `extra` words, lowercased.
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        set.words
            .extend(extra.into_iter().map(|w| w.as_ref().trim().to_lowercase()));
        set.words.remove("");
        set
    }

    /// Exactly the given words, lowercased.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    /// Case-sensitive membership test; callers pass lowercased tokens.
    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    /// Drop stopwords from `tokens`, keeping order.
    pub fn filter<'a, I>(&'a self, tokens: I) -> impl Iterator<Item = String> + 'a
    where
        I: IntoIterator<Item = String>,
        I::IntoIter: 'a,
    {
        tokens.into_iter().filter(move |t| !self.contains(t))
    }
}
