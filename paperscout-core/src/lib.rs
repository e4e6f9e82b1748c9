//! # PaperScout Core
//!
//! Core library for PaperScout.
//! Provides the paper data model, the keyword and citation pipeline that
//! enriches fetched papers, configuration, error types, and JSON persistence.

pub mod assembler;
pub mod citation;
pub mod config;
pub mod error;
pub mod persistence;
pub mod ranker;
pub mod stopwords;
pub mod tokenizer;
pub mod types;

// Re-export commonly used types at the crate root.
pub use assembler::{enrich_batch, enrich_paper, KeywordOptions};
pub use citation::{format_citation, NO_DATE};
pub use config::{load_config, ScoutConfig, SortKey, SortOrder};
pub use error::{ConfigError, FetchError, PaperScoutError, PersistenceError, Result};
pub use persistence::{load_records, save_records};
pub use stopwords::StopwordSet;
pub use types::{EnrichedPaperRecord, RawPaperFields};
