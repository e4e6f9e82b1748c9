//! Single-query and interactive search modes.

use dialoguer::{Input, Select};
use paperscout_core::config::MAX_RESULTS_LIMIT;
use paperscout_core::{ScoutConfig, SortKey, SortOrder};
use paperscout_tools::{ArxivClient, Scout, ScoutReport, SearchRequest};

use crate::render::render_records;
use crate::OutputMode;

/// Sort choices offered in interactive mode.
const SORT_CHOICES: &[(&str, SortKey, SortOrder)] = &[
    ("Relevance", SortKey::Relevance, SortOrder::Descending),
    ("Newest first", SortKey::SubmittedDate, SortOrder::Descending),
    ("Oldest first", SortKey::SubmittedDate, SortOrder::Ascending),
    ("Recently updated", SortKey::LastUpdatedDate, SortOrder::Descending),
];

fn build_scout(config: &ScoutConfig, save: bool) -> anyhow::Result<Scout<ArxivClient>> {
    let client = ArxivClient::new(&config.http)?;
    let scout = Scout::from_config(client, config);
    Ok(if save { scout } else { scout.without_saving() })
}

/// Run one search and print the results.
pub async fn run_single_search(
    query: &str,
    config: ScoutConfig,
    mode: OutputMode,
    save: bool,
) -> anyhow::Result<()> {
    let scout = build_scout(&config, save)?;
    let request = SearchRequest::from_config(query, &config.search)?;
    let report = scout
        .run(&request)
        .await
        .map_err(|e| anyhow::anyhow!("Search failed: {}", e))?;
    print_report(&report, mode)?;
    Ok(())
}

/// Prompt for searches until an empty query is entered.
pub async fn run_interactive(
    mut config: ScoutConfig,
    mode: OutputMode,
    save: bool,
) -> anyhow::Result<()> {
    let scout = build_scout(&config, save)?;
    println!("PaperScout: search arXiv. Press Enter on an empty query to quit.\n");

    loop {
        let query: String = Input::new()
            .with_prompt("Topic")
            .allow_empty(true)
            .interact_text()?;
        if query.trim().is_empty() {
            break;
        }

        let default_limit = config.search.max_results.clamp(1, MAX_RESULTS_LIMIT);
        let limit: usize = Input::new()
            .with_prompt(format!("Number of papers (1-{})", MAX_RESULTS_LIMIT))
            .default(default_limit)
            .validate_with(|n: &usize| -> Result<(), String> {
                if (1..=MAX_RESULTS_LIMIT).contains(n) {
                    Ok(())
                } else {
                    Err(format!("Enter a number between 1 and {}", MAX_RESULTS_LIMIT))
                }
            })
            .interact_text()?;

        let labels: Vec<&str> = SORT_CHOICES.iter().map(|(label, _, _)| *label).collect();
        let current = SORT_CHOICES
            .iter()
            .position(|(_, key, order)| {
                *key == config.search.sort_by && *order == config.search.sort_order
            })
            .unwrap_or(0);
        let choice = Select::new()
            .with_prompt("Sort by")
            .items(&labels)
            .default(current)
            .interact()?;

        let (_, sort_by, sort_order) = SORT_CHOICES[choice];
        config.search.max_results = limit;
        config.search.sort_by = sort_by;
        config.search.sort_order = sort_order;

        let request = match SearchRequest::from_config(&query, &config.search) {
            Ok(request) => request,
            Err(e) => {
                eprintln!("  {}\n", e);
                continue;
            }
        };

        // Report the failure and keep prompting.
        match scout.run(&request).await {
            Ok(report) => print_report(&report, mode)?,
            Err(e) => eprintln!("  Search failed: {}\n", e),
        }
    }

    Ok(())
}

fn print_report(report: &ScoutReport, mode: OutputMode) -> anyhow::Result<()> {
    match mode {
        OutputMode::Json => {
            println!("{}", serde_json::to_string_pretty(&report.records)?);
        }
        OutputMode::Text => {
            if report.records.is_empty() {
                println!("No papers found.");
            } else {
                println!(
                    "Found {} paper(s) ({} total matches).\n",
                    report.records.len(),
                    report.total_results
                );
                println!("{}", render_records(&report.records));
            }
            if let Some(path) = &report.saved_to {
                println!("Saved to {}", path.display());
            }
        }
    }
    Ok(())
}
