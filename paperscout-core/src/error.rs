//! Error types for PaperScout.
//!
//! The enrichment pipeline itself never fails; these errors belong to the
//! collaborators around it: fetching, persistence, and configuration.

use std::path::PathBuf;

/// Top-level error type for PaperScout.
#[derive(Debug, thiserror::Error)]
pub enum PaperScoutError {
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors from the paper search API.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Failed to create HTTP client: {message}")]
    ClientBuild { message: String },

    #[error("API request failed: {message}")]
    Request { message: String },

    #[error("API returned status {status}")]
    Status { status: u16 },

    #[error("Failed to read API response: {message}")]
    Body { message: String },

    #[error("Invalid search query: {reason}")]
    InvalidQuery { reason: String },
}

/// Errors from writing or reading the results file.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize records: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors from the configuration system.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {message}")]
    Invalid { message: String },

    #[error("Configuration load error: {message}")]
    Load { message: String },
}

/// A type alias for results using the top-level `PaperScoutError`.
pub type Result<T> = std::result::Result<T, PaperScoutError>;
