//! PaperScout CLI: search arXiv from the terminal.
//!
//! Provides both single-query and interactive modes.

mod commands;
mod render;
mod repl;

use clap::Parser;
use paperscout_core::{SortKey, SortOrder};
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// PaperScout: find papers on arXiv, with citations and keywords
#[derive(Parser, Debug)]
#[command(name = "paperscout", version, about, long_about = None)]
struct Cli {
    /// Topic to search for (starts interactive mode if omitted)
    query: Option<String>,

    /// Number of papers to fetch (1-10)
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u8).range(1..=10))]
    limit: Option<u8>,

    /// Sort by: relevance, date (submitted), updated
    #[arg(long)]
    sort: Option<String>,

    /// Sort order: asc or desc
    #[arg(long)]
    order: Option<String>,

    /// Offset into the result list
    #[arg(long)]
    start: Option<usize>,

    /// Restrict to an arXiv category (e.g. cs.CL)
    #[arg(long)]
    category: Option<String>,

    /// Results file (overwritten on every search)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Keywords to keep per paper
    #[arg(long)]
    top_keywords: Option<usize>,

    /// Print results as JSON instead of formatted text
    #[arg(long)]
    json: bool,

    /// Do not write the results file
    #[arg(long)]
    no_save: bool,

    /// Workspace directory
    #[arg(short, long, default_value = ".")]
    workspace: PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long)]
    quiet: bool,

    /// Subcommand
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Show the papers saved by the last search
    Show {
        /// Results file (defaults to the configured output path)
        path: Option<PathBuf>,
    },
}

#[derive(clap::Subcommand, Debug)]
enum ConfigAction {
    /// Create default configuration file
    Init,
    /// Show current configuration
    Show,
}

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OutputMode {
    Text,
    Json,
}

impl Cli {
    /// Fold command-line flags into the loaded configuration.
    fn apply_overrides(&self, config: &mut paperscout_core::ScoutConfig) {
        if let Some(limit) = self.limit {
            config.search.max_results = usize::from(limit);
        }
        if let Some(sort) = &self.sort {
            config.search.sort_by = SortKey::from_str_loose(sort);
        }
        if let Some(order) = &self.order {
            config.search.sort_order = SortOrder::from_str_loose(order);
        }
        if let Some(start) = self.start {
            config.search.start = start;
        }
        if let Some(category) = &self.category {
            config.search.category = Some(category.clone());
        }
        if let Some(output) = &self.output {
            config.output.path = output.clone();
        }
        if let Some(top) = self.top_keywords {
            config.keywords.top_n = top;
        }
    }
}

/// Open the daily-rolling JSON log file under `log_dir`.
fn open_log_file(log_dir: &Path) -> anyhow::Result<RollingFileAppender> {
    std::fs::create_dir_all(log_dir)?;
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("paperscout.log")
        .build(log_dir)?;
    Ok(appender)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Set up tracing: human-readable stderr + JSON file logging
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::new(filter));

    let log_dir = directories::ProjectDirs::from("dev", "paperscout", "paperscout")
        .map(|d| d.data_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("."));
    // Falls back to stderr-only logging when the log directory is unusable.
    let (json_layer, _guard, log_error) = match open_log_file(&log_dir) {
        Ok(appender) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_filter(EnvFilter::new("debug"));
            (Some(layer), Some(guard), None)
        }
        Err(e) => (None, None, Some(e)),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    if let Some(e) = log_error {
        tracing::warn!(dir = %log_dir.display(), "File logging disabled: {}", e);
    }

    // Resolve workspace
    let workspace = cli
        .workspace
        .canonicalize()
        .unwrap_or_else(|_| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    let mut config = paperscout_core::load_config(Some(&workspace))
        .map_err(|e| anyhow::anyhow!("Configuration error: {}", e))?;
    cli.apply_overrides(&mut config);
    for warning in config.validate() {
        tracing::warn!("{}", warning);
    }

    if let Some(command) = cli.command {
        return commands::handle_command(command, &workspace, &config);
    }

    let mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Text
    };

    match cli.query {
        Some(query) => repl::run_single_search(&query, config, mode, !cli.no_save).await,
        None => repl::run_interactive(config, mode, !cli.no_save).await,
    }
}
