//! Configuration system for PaperScout.
//!
//! Uses `figment` for layered configuration: defaults -> config file -> environment.
//! Configuration is loaded from `~/.config/paperscout/config.toml` and/or
//! `.paperscout/config.toml` in the workspace directory. Command-line flags
//! are folded in by the binary after loading.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::assembler::KeywordOptions;
use crate::ranker::DEFAULT_TOP_N;
use crate::stopwords::StopwordSet;

/// Largest page the front end will request.
pub const MAX_RESULTS_LIMIT: usize = 10;

/// Default results file, overwritten on every run.
pub const DEFAULT_OUTPUT_FILE: &str = "scraped_papers.json";

/// arXiv Atom query endpoint.
pub const ARXIV_API_URL: &str = "https://export.arxiv.org/api/query";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoutConfig {
    pub search: SearchConfig,
    pub keywords: KeywordConfig,
    pub output: OutputConfig,
    pub http: HttpConfig,
}

/// What to ask the search API for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Papers per request, 1 to [`MAX_RESULTS_LIMIT`].
    pub max_results: usize,
    /// Offset into the result list.
    pub start: usize,
    pub sort_by: SortKey,
    pub sort_order: SortOrder,
    /// Optional arXiv category filter, e.g. `cs.CL`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: 5,
            start: 0,
            sort_by: SortKey::Relevance,
            sort_order: SortOrder::Descending,
            category: None,
        }
    }
}

/// Sort criteria understood by the arXiv API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Relevance,
    LastUpdatedDate,
    SubmittedDate,
}

impl SortKey {
    pub fn as_api_str(&self) -> &str {
        match self {
            SortKey::Relevance => "relevance",
            SortKey::LastUpdatedDate => "lastUpdatedDate",
            SortKey::SubmittedDate => "submittedDate",
        }
    }

    pub fn from_str_loose(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "date" | "submitted" | "submitteddate" | "submitted_date" | "newest" => {
                SortKey::SubmittedDate
            }
            "updated" | "lastupdateddate" | "last_updated_date" => SortKey::LastUpdatedDate,
            _ => SortKey::Relevance,
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortKey::Relevance => write!(f, "relevance"),
            SortKey::LastUpdatedDate => write!(f, "last updated"),
            SortKey::SubmittedDate => write!(f, "submitted date"),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl SortOrder {
    pub fn as_api_str(&self) -> &str {
        match self {
            SortOrder::Ascending => "ascending",
            SortOrder::Descending => "descending",
        }
    }

    pub fn from_str_loose(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" | "oldest" => SortOrder::Ascending,
            _ => SortOrder::Descending,
        }
    }
}

/// Keyword extraction settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordConfig {
    /// Keywords kept per paper.
    pub top_n: usize,
    /// Words excluded in addition to the built-in stopword table.
    pub extra_stopwords: Vec<String>,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            extra_stopwords: Vec::new(),
        }
    }
}

impl KeywordConfig {
    /// Build the stopword set once for a whole run.
    pub fn to_options(&self) -> KeywordOptions {
        KeywordOptions {
            stopwords: StopwordSet::with_extra(&self.extra_stopwords),
            top_n: self.top_n,
        }
    }
}

/// Where results are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_OUTPUT_FILE),
        }
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Query endpoint the search requests go to.
    pub api_url: String,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    /// Minimum gap between two API requests.
    pub min_request_interval_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            api_url: ARXIV_API_URL.to_string(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
            min_request_interval_ms: 3000,
        }
    }
}

impl ScoutConfig {
    /// Check for values the tool would reject or silently misuse.
    ///
    /// Returns a list of warning messages (empty = valid).
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.search.max_results == 0 || self.search.max_results > MAX_RESULTS_LIMIT {
            warnings.push(format!(
                "search.max_results ({}) must be between 1 and {}",
                self.search.max_results, MAX_RESULTS_LIMIT
            ));
        }
        if self.keywords.top_n == 0 {
            warnings.push("keywords.top_n is 0; no keywords will be extracted".to_string());
        }
        if self.output.path.as_os_str().is_empty() {
            warnings.push("output.path is empty".to_string());
        }
        if self.http.api_url.trim().is_empty() {
            warnings.push("http.api_url is empty".to_string());
        }
        if self.http.timeout_secs == 0 {
            warnings.push("http.timeout_secs must be greater than 0".to_string());
        }
        if let Some(category) = &self.search.category {
            if category.trim().is_empty() {
                warnings.push("search.category is set but empty".to_string());
            }
        }

        warnings
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("dev", "paperscout", "paperscout")
}

/// Path of the workspace-level config file.
pub fn workspace_config_path(workspace: &Path) -> PathBuf {
    workspace.join(".paperscout").join("config.toml")
}

/// Load configuration from layered sources.
///
/// Priority (highest to lowest):
/// 1. Environment variables (prefixed with `PAPERSCOUT_`)
/// 2. Workspace-local config (`.paperscout/config.toml`)
/// 3. User config (`~/.config/paperscout/config.toml`)
/// 4. Built-in defaults
pub fn load_config(workspace: Option<&Path>) -> Result<ScoutConfig, Box<figment::Error>> {
    let mut figment = Figment::from(Serialized::defaults(ScoutConfig::default()));

    if let Some(dirs) = project_dirs() {
        let user_config = dirs.config_dir().join("config.toml");
        if user_config.exists() {
            figment = figment.merge(Toml::file(&user_config));
        }
    }

    if let Some(ws) = workspace {
        let ws_config = workspace_config_path(ws);
        if ws_config.exists() {
            figment = figment.merge(Toml::file(&ws_config));
        }
    }

    // PAPERSCOUT_SEARCH__MAX_RESULTS, PAPERSCOUT_OUTPUT__PATH, etc.
    figment = figment.merge(Env::prefixed("PAPERSCOUT_").split("__"));

    figment.extract().map_err(Box::new)
}
