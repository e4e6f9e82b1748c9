//! Paper records flowing through the pipeline.

use serde::{Deserialize, Serialize};

/// Fields extracted from one search-result entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPaperFields {
    pub title: String,
    pub authors: Vec<String>,
    pub summary: String,
    pub link: String,
    /// Publication date as reported by the source, usually ISO-8601.
    #[serde(default)]
    pub published: Option<String>,
}

impl RawPaperFields {
    /// Publication date, or `None` when it is absent, blank, or a "no date" marker.
    pub fn published_date(&self) -> Option<&str> {
        let date = self.published.as_deref()?.trim();
        if date.is_empty()
            || date.eq_ignore_ascii_case("n.d.")
            || date.eq_ignore_ascii_case("n/a")
        {
            None
        } else {
            Some(date)
        }
    }
}

/// A fetched paper together with its derived citation and keywords.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedPaperRecord {
    #[serde(flatten)]
    pub paper: RawPaperFields,
    pub citation: String,
    pub keywords: Vec<String>,
}
