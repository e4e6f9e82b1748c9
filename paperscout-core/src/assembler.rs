//! Turns fetched papers into enriched records.

use crate::citation::format_citation;
use crate::ranker::{top_keywords, DEFAULT_TOP_N};
use crate::stopwords::StopwordSet;
use crate::tokenizer::tokenize;
use crate::types::{EnrichedPaperRecord, RawPaperFields};

/// Keyword extraction settings shared by every paper in a batch.
#[derive(Debug, Clone)]
pub struct KeywordOptions {
    pub stopwords: StopwordSet,
    pub top_n: usize,
}

impl Default for KeywordOptions {
    fn default() -> Self {
        Self {
            stopwords: StopwordSet::new(),
            top_n: DEFAULT_TOP_N,
        }
    }
}

/// Derive the citation and keywords for one paper.
pub fn enrich_paper(paper: &RawPaperFields, options: &KeywordOptions) -> EnrichedPaperRecord {
    let citation = format_citation(paper);

    let text = format!("{} {}", paper.title, paper.summary);
    let keywords = top_keywords(options.stopwords.filter(tokenize(&text)), options.top_n);

    tracing::debug!(
        title = %paper.title,
        keywords = keywords.len(),
        "Enriched paper"
    );

    EnrichedPaperRecord {
        paper: paper.clone(),
        citation,
        keywords,
    }
}

/// Enrich every paper, keeping input order.
pub fn enrich_batch(papers: &[RawPaperFields], options: &KeywordOptions) -> Vec<EnrichedPaperRecord> {
    papers.iter().map(|p| enrich_paper(p, options)).collect()
}
