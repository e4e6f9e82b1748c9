//! Terminal rendering of paper records.

use chrono::{DateTime, NaiveDate};
use paperscout_core::{EnrichedPaperRecord, NO_DATE};
use std::fmt::Write;

const SUMMARY_WIDTH: usize = 88;
const SUMMARY_INDENT: &str = "      ";

/// Human-friendly publication date, e.g. "May 01, 2021".
///
/// Falls back to the raw text when it isn't a recognizable date, and to
/// "n.d." when there is none.
pub fn format_published(published: Option<&str>) -> String {
    let Some(raw) = published.map(str::trim).filter(|d| !d.is_empty()) else {
        return NO_DATE.to_string();
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%B %d, %Y").to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%B %d, %Y").to_string();
    }
    raw.to_string()
}

/// Render one record as a numbered block.
pub fn render_record(index: usize, record: &EnrichedPaperRecord) -> String {
    let paper = &record.paper;
    let mut out = String::new();

    let _ = writeln!(out, "{:>3}. {}", index + 1, paper.title);
    let authors = if paper.authors.is_empty() {
        "(unknown)".to_string()
    } else {
        paper.authors.join(", ")
    };
    let _ = writeln!(out, "     Authors:   {}", authors);
    let _ = writeln!(
        out,
        "     Published: {}",
        format_published(paper.published_date())
    );
    let _ = writeln!(out, "     Link:      {}", paper.link);
    let keywords = if record.keywords.is_empty() {
        "-".to_string()
    } else {
        record.keywords.join(", ")
    };
    let _ = writeln!(out, "     Keywords:  {}", keywords);
    let _ = writeln!(out, "     Citation:  {}", record.citation);

    if !paper.summary.is_empty() {
        let options = textwrap::Options::new(SUMMARY_WIDTH)
            .initial_indent(SUMMARY_INDENT)
            .subsequent_indent(SUMMARY_INDENT);
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", textwrap::fill(&paper.summary, options));
    }

    out
}

/// Render every record, separated by blank lines.
pub fn render_records(records: &[EnrichedPaperRecord]) -> String {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| render_record(i, record))
        .collect::<Vec<_>>()
        .join("\n")
}
