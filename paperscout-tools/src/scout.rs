//! Fetch → enrich → save, for one page of search results.

use paperscout_core::{
    enrich_batch, save_records, EnrichedPaperRecord, KeywordOptions, PaperScoutError, ScoutConfig,
};
use std::path::PathBuf;

use crate::source::{PaperSource, SearchRequest};

/// What a finished run produced.
#[derive(Debug, Clone)]
pub struct ScoutReport {
    pub records: Vec<EnrichedPaperRecord>,
    /// Matches reported by the source, across all pages.
    pub total_results: usize,
    /// Where the records were written, if they were saved.
    pub saved_to: Option<PathBuf>,
}

/// Runs searches against a [`PaperSource`] and saves the enriched results.
pub struct Scout<S> {
    source: S,
    options: KeywordOptions,
    output: Option<PathBuf>,
}

impl<S: PaperSource> Scout<S> {
    /// A scout that saves every run to `output`.
    pub fn new(source: S, options: KeywordOptions, output: impl Into<PathBuf>) -> Self {
        Self {
            source,
            options,
            output: Some(output.into()),
        }
    }

    /// A scout configured from the keyword and output sections of `config`.
    pub fn from_config(source: S, config: &ScoutConfig) -> Self {
        Self::new(source, config.keywords.to_options(), &config.output.path)
    }

    /// Skip writing the results file.
    pub fn without_saving(mut self) -> Self {
        self.output = None;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch one page, enrich it in order, and save it.
    ///
    /// An empty page is still saved, as an empty list.
    pub async fn run(&self, request: &SearchRequest) -> Result<ScoutReport, PaperScoutError> {
        tracing::info!(
            source = self.source.name(),
            query = %request.query,
            max_results = request.max_results,
            "Searching for papers"
        );

        let page = self.source.search(request).await?;
        let records = enrich_batch(&page.papers, &self.options);

        if let Some(path) = &self.output {
            save_records(path, &records)?;
        }

        tracing::info!(
            fetched = records.len(),
            total = page.total_results,
            "Search complete"
        );

        Ok(ScoutReport {
            records,
            total_results: page.total_results,
            saved_to: self.output.clone(),
        })
    }
}
