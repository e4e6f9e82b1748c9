//! Plain-text citations for arXiv papers.

use crate::types::RawPaperFields;

/// Year placeholder used when a paper carries no publication date.
pub const NO_DATE: &str = "n.d.";

/// Format a citation like
/// `"A. Smith, B. Jones (2021). Title. arXiv preprint arXiv:2101.00001."`.
///
/// An empty author list leaves the leading segment empty, so the citation
/// starts with `" ("`.
pub fn format_citation(paper: &RawPaperFields) -> String {
    format!(
        "{} ({}). {}. arXiv preprint arXiv:{}.",
        paper.authors.join(", "),
        citation_year(paper.published_date()),
        paper.title,
        identifier_from_link(&paper.link),
    )
}

/// The first four characters of the date, or [`NO_DATE`].
pub fn citation_year(published: Option<&str>) -> String {
    match published {
        Some(date) => date.chars().take(4).collect(),
        None => NO_DATE.to_string(),
    }
}

/// Everything after the last `/` of the link, or the whole link if it has none.
pub fn identifier_from_link(link: &str) -> &str {
    match link.rfind('/') {
        Some(pos) => &link[pos + 1..],
        None => link,
    }
}
