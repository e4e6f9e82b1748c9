//! The seam between the pipeline and wherever papers come from.

use async_trait::async_trait;
use paperscout_core::config::{SearchConfig, MAX_RESULTS_LIMIT};
use paperscout_core::{FetchError, RawPaperFields, SortKey, SortOrder};

/// One search against a paper source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub category: Option<String>,
    pub start: usize,
    pub max_results: usize,
    pub sort_by: SortKey,
    pub sort_order: SortOrder,
}

impl SearchRequest {
    /// Build a request for `query` using the configured search settings.
    ///
    /// Rejects a blank query and a page size outside `1..=MAX_RESULTS_LIMIT`.
    pub fn from_config(query: &str, search: &SearchConfig) -> Result<Self, FetchError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(FetchError::InvalidQuery {
                reason: "query cannot be empty".to_string(),
            });
        }
        if search.max_results == 0 || search.max_results > MAX_RESULTS_LIMIT {
            return Err(FetchError::InvalidQuery {
                reason: format!(
                    "result limit must be between 1 and {}, got {}",
                    MAX_RESULTS_LIMIT, search.max_results
                ),
            });
        }

        Ok(Self {
            query: query.to_string(),
            category: search
                .category
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(String::from),
            start: search.start,
            max_results: search.max_results,
            sort_by: search.sort_by,
            sort_order: search.sort_order,
        })
    }
}

/// One page of results plus the feed's paging metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPage {
    pub papers: Vec<RawPaperFields>,
    pub total_results: usize,
    pub start_index: usize,
    pub items_per_page: usize,
}

/// Anything that can answer a [`SearchRequest`].
#[async_trait]
pub trait PaperSource: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    async fn search(&self, request: &SearchRequest) -> Result<SearchPage, FetchError>;
}
