//! # PaperScout Tools
//!
//! Paper sources and the search pipeline for PaperScout.
//! Provides the arXiv API client, its Atom feed parser, the [`PaperSource`]
//! trait the pipeline fetches through, and [`Scout`], which fetches,
//! enriches, and saves one page of results.

pub mod arxiv_api;
pub mod scout;
pub mod source;

pub use arxiv_api::ArxivClient;
pub use scout::{Scout, ScoutReport};
pub use source::{PaperSource, SearchPage, SearchRequest};
