//! ArXiv API client: search URL building and Atom feed parsing.

use async_trait::async_trait;
use paperscout_core::config::HttpConfig;
use paperscout_core::{FetchError, RawPaperFields};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use crate::source::{PaperSource, SearchPage, SearchRequest};

// ── ArXiv API Client ──────────────────────────────────────────

const USER_AGENT: &str = concat!("paperscout/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the ArXiv API.
pub struct ArxivClient {
    client: reqwest::Client,
    api_url: String,
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl ArxivClient {
    pub fn new(http: &HttpConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(http.timeout_secs))
            .connect_timeout(Duration::from_secs(http.connect_timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FetchError::ClientBuild {
                message: e.to_string(),
            })?;
        Ok(Self {
            client,
            api_url: http.api_url.clone(),
            min_interval: Duration::from_millis(http.min_request_interval_ms),
            last_request: Mutex::new(None),
        })
    }

    /// Enforce the minimum delay between ArXiv API requests.
    ///
    /// The lock is held across the sleep, so concurrent callers queue up.
    async fn rate_limit(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(instant) = *last {
            let elapsed = instant.elapsed();
            if elapsed < self.min_interval {
                tokio::time::sleep(self.min_interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }

    /// Search ArXiv with the given parameters.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchPage, FetchError> {
        self.rate_limit().await;
        let url = build_search_url(&self.api_url, request);
        tracing::debug!("ArXiv search URL: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Request {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| FetchError::Body {
            message: e.to_string(),
        })?;

        let page = parse_atom_response(&body);
        tracing::debug!(
            papers = page.papers.len(),
            total = page.total_results,
            "Parsed ArXiv feed"
        );
        Ok(page)
    }
}

#[async_trait]
impl PaperSource for ArxivClient {
    fn name(&self) -> &str {
        "arxiv"
    }

    async fn search(&self, request: &SearchRequest) -> Result<SearchPage, FetchError> {
        ArxivClient::search(self, request).await
    }
}

// ── URL Building ──────────────────────────────────────────────

/// Build the ArXiv API search URL for a request against `api_url`.
pub fn build_search_url(api_url: &str, request: &SearchRequest) -> String {
    let mut search_query = format!("all:{}", request.query);

    if let Some(cat) = &request.category {
        search_query = format!("{} AND cat:{}", search_query, cat);
    }

    format!(
        "{}?search_query={}&start={}&max_results={}&sortBy={}&sortOrder={}",
        api_url,
        urlencoding::encode(&search_query),
        request.start,
        request.max_results,
        request.sort_by.as_api_str(),
        request.sort_order.as_api_str(),
    )
}

// ── XML Parsing ───────────────────────────────────────────────

/// Parse the Atom XML response from the ArXiv API.
///
/// Entries without an `<id>` or `<title>` are skipped. A feed with no
/// entries yields an empty page.
pub fn parse_atom_response(xml: &str) -> SearchPage {
    let total_results = extract_opensearch_value(xml, "totalResults").unwrap_or(0);
    let start_index = extract_opensearch_value(xml, "startIndex").unwrap_or(0);
    let items_per_page = extract_opensearch_value(xml, "itemsPerPage").unwrap_or(0);

    let mut papers = Vec::new();
    for entry_xml in extract_blocks(xml, "entry") {
        match parse_entry(entry_xml) {
            Some(paper) => papers.push(paper),
            None => tracing::warn!("Skipping ArXiv entry without id or title"),
        }
    }

    SearchPage {
        papers,
        total_results,
        start_index,
        items_per_page,
    }
}

/// Extract every `<tag>...</tag>` block, in document order.
fn extract_blocks<'a>(xml: &'a str, tag: &str) -> Vec<&'a str> {
    let start_tag = format!("<{}>", tag);
    let end_tag = format!("</{}>", tag);
    let mut blocks = Vec::new();
    let mut search_from = 0;

    while let Some(pos) = xml[search_from..].find(&start_tag) {
        let start = search_from + pos;
        let Some(end_pos) = xml[start..].find(&end_tag) else {
            break;
        };
        let end = start + end_pos + end_tag.len();
        blocks.push(&xml[start..end]);
        search_from = end;
    }

    blocks
}

/// Parse a single <entry> XML block.
fn parse_entry(entry: &str) -> Option<RawPaperFields> {
    let link = extract_tag_text(entry, "id")?;
    let title = normalize_whitespace(&decode_entities(&extract_tag_text(entry, "title")?));
    if title.is_empty() {
        return None;
    }

    let authors = extract_blocks(entry, "author")
        .into_iter()
        .filter_map(|block| extract_tag_text(block, "name"))
        .map(|name| normalize_whitespace(&decode_entities(&name)))
        .collect();

    let summary = normalize_whitespace(&decode_entities(
        &extract_tag_text(entry, "summary").unwrap_or_default(),
    ));
    let published = extract_tag_text(entry, "published").filter(|p| !p.is_empty());

    Some(RawPaperFields {
        title,
        authors,
        summary,
        link,
        published,
    })
}

/// Extract the text content of the first occurrence of <tag>text</tag>.
fn extract_tag_text(xml: &str, tag: &str) -> Option<String> {
    let open = format!("<{}", tag);
    let close = format!("</{}>", tag);

    // Skip longer tags sharing the prefix, e.g. <id> vs <idx>.
    let mut from = 0;
    let start_pos = loop {
        let pos = from + xml[from..].find(&open)?;
        match xml[pos + open.len()..].chars().next() {
            Some('>') | Some(' ') | Some('\t') | Some('\n') | Some('\r') => break pos,
            _ => from = pos + open.len(),
        }
    };
    // Find the end of the opening tag (could have attributes)
    let content_start = xml[start_pos..].find('>')? + start_pos + 1;
    let content_end = xml[content_start..].find(&close)? + content_start;

    Some(xml[content_start..content_end].trim().to_string())
}

/// Normalize whitespace: collapse runs of whitespace into single spaces.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Decode XML entities and character references (`&amp;`, `&#233;`, `&#x3B1;`).
///
/// Text with a malformed reference is returned as is.
pub fn decode_entities(s: &str) -> String {
    match quick_xml::escape::unescape(s) {
        Ok(text) => text.into_owned(),
        Err(e) => {
            tracing::debug!("Keeping undecodable XML text: {}", e);
            s.to_string()
        }
    }
}

/// Extract an OpenSearch value like <opensearch:totalResults>100</opensearch:totalResults>.
fn extract_opensearch_value(xml: &str, field: &str) -> Option<usize> {
    let tag = format!("opensearch:{}", field);
    extract_tag_text(xml, &tag).and_then(|s| s.trim().parse().ok())
}

// ── Tests ─────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use paperscout_core::config::{SearchConfig, ARXIV_API_URL};
    use paperscout_core::{SortKey, SortOrder};
    use mockito::Matcher;
    use pretty_assertions::assert_eq;

    const SAMPLE_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom"
      xmlns:opensearch="http://a9.com/-/spec/opensearch/1.1/"
      xmlns:arxiv="http://arxiv.org/schemas/atom">
  <title>ArXiv Query</title>
  <id>http://arxiv.org/api/feed-id</id>
  <opensearch:totalResults>100</opensearch:totalResults>
  <opensearch:startIndex>0</opensearch:startIndex>
  <opensearch:itemsPerPage>2</opensearch:itemsPerPage>
  <entry>
    <id>http://arxiv.org/abs/1706.03762v7</id>
    <updated>2023-08-02T01:09:28Z</updated>
    <published>2017-06-12T17:57:34Z</published>
    <title>Attention Is All
      You Need</title>
    <summary>  The dominant sequence transduction models are based on complex recurrent or
convolutional neural networks.  </summary>
    <author><name>Ashish Vaswani</name></author>
    <author><name>Noam Shazeer</name><arxiv:affiliation>Google</arxiv:affiliation></author>
    <link href="http://arxiv.org/abs/1706.03762v7" rel="alternate" type="text/html"/>
    <category term="cs.CL"/>
  </entry>
  <entry>
    <id>http://arxiv.org/abs/1810.04805v2</id>
    <updated>2019-05-24T12:00:00Z</updated>
    <title>BERT &amp; Friends</title>
    <summary>We introduce a new language representation model.</summary>
  </entry>
</feed>"#;

    fn request(query: &str) -> SearchRequest {
        SearchRequest::from_config(query, &SearchConfig::default()).unwrap()
    }

    #[test]
    fn test_parse_feed_entries_in_order() {
        let page = parse_atom_response(SAMPLE_FEED);
        assert_eq!(page.papers.len(), 2);
        assert_eq!(page.total_results, 100);
        assert_eq!(page.start_index, 0);
        assert_eq!(page.items_per_page, 2);
        assert_eq!(page.papers[0].link, "http://arxiv.org/abs/1706.03762v7");
        assert_eq!(page.papers[1].link, "http://arxiv.org/abs/1810.04805v2");
    }

    #[test]
    fn test_parse_entry_fields() {
        let page = parse_atom_response(SAMPLE_FEED);
        let paper = &page.papers[0];
        assert_eq!(paper.title, "Attention Is All You Need");
        assert_eq!(paper.authors, vec!["Ashish Vaswani", "Noam Shazeer"]);
        assert_eq!(
            paper.summary,
            "The dominant sequence transduction models are based on complex recurrent or convolutional neural networks."
        );
        assert_eq!(paper.published.as_deref(), Some("2017-06-12T17:57:34Z"));
    }

    #[test]
    fn test_parse_entry_missing_optionals() {
        let page = parse_atom_response(SAMPLE_FEED);
        let paper = &page.papers[1];
        assert_eq!(paper.title, "BERT & Friends");
        assert!(paper.authors.is_empty());
        assert!(paper.published.is_none());
    }

    #[test]
    fn test_parse_empty_results() {
        let feed = r#"<feed>
            <opensearch:totalResults>0</opensearch:totalResults>
            <opensearch:startIndex>0</opensearch:startIndex>
            <opensearch:itemsPerPage>10</opensearch:itemsPerPage>
        </feed>"#;
        let page = parse_atom_response(feed);
        assert!(page.papers.is_empty());
        assert_eq!(page.total_results, 0);
    }

    #[test]
    fn test_parse_skips_entry_without_title() {
        let feed = r#"<feed>
            <entry><id>http://arxiv.org/abs/2301.00001v1</id><summary>x</summary></entry>
            <entry><id>http://arxiv.org/abs/2301.00002v1</id><title>Kept</title></entry>
        </feed>"#;
        let page = parse_atom_response(feed);
        assert_eq!(page.papers.len(), 1);
        assert_eq!(page.papers[0].title, "Kept");
    }

    #[test]
    fn test_parse_garbage_is_empty() {
        assert!(parse_atom_response("not xml at all").papers.is_empty());
        assert!(parse_atom_response("").papers.is_empty());
    }

    #[test]
    fn test_extract_tag_text_exact_name() {
        let xml = "<idx>wrong</idx><id>right</id>";
        assert_eq!(extract_tag_text(xml, "id").as_deref(), Some("right"));
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(
            normalize_whitespace("  Hello   World\n  Test  "),
            "Hello World Test"
        );
        assert_eq!(normalize_whitespace("single"), "single");
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("a &lt;b&gt; &amp;amp; c"), "a <b> &amp; c");
        assert_eq!(decode_entities("plain"), "plain");
    }

    #[test]
    fn test_decode_character_references() {
        assert_eq!(decode_entities("Caf&#233; &#x3B1;-Model"), "Café α-Model");
        assert_eq!(decode_entities("broken &bogus; ref"), "broken &bogus; ref");
    }

    #[test]
    fn test_parse_entry_with_character_references() {
        let feed = r#"<feed>
            <entry>
              <id>http://arxiv.org/abs/2402.00001v1</id>
              <title>Caf&#233; &#x3B1;-Model</title>
              <summary>Na&#239;ve caf&#233; baselines</summary>
              <author><name>Ren&#233;e Dupr&#233;</name></author>
            </entry>
        </feed>"#;
        let page = parse_atom_response(feed);
        let paper = &page.papers[0];
        assert_eq!(paper.title, "Café α-Model");
        assert_eq!(paper.summary, "Naïve café baselines");
        assert_eq!(paper.authors, vec!["Renée Dupré"]);
    }

    #[test]
    fn test_build_search_url_basic() {
        let url = build_search_url(ARXIV_API_URL, &request("machine learning"));
        assert!(url.starts_with(ARXIV_API_URL));
        assert!(url.contains("search_query=all%3Amachine%20learning"));
        assert!(url.contains("start=0"));
        assert!(url.contains("max_results=5"));
        assert!(url.contains("sortBy=relevance"));
        assert!(url.contains("sortOrder=descending"));
    }

    #[test]
    fn test_build_search_url_with_category_and_sort() {
        let search = SearchConfig {
            max_results: 3,
            start: 20,
            sort_by: SortKey::SubmittedDate,
            sort_order: SortOrder::Ascending,
            category: Some("cs.AI".to_string()),
        };
        let url = build_search_url(
            ARXIV_API_URL,
            &SearchRequest::from_config("attention", &search).unwrap(),
        );
        assert!(url.contains("cat%3Acs.AI"));
        assert!(url.contains("start=20"));
        assert!(url.contains("max_results=3"));
        assert!(url.contains("sortBy=submittedDate"));
        assert!(url.contains("sortOrder=ascending"));
    }

    #[tokio::test]
    async fn test_rate_limit_spaces_requests() {
        let http = HttpConfig {
            min_request_interval_ms: 50,
            ..Default::default()
        };
        let client = ArxivClient::new(&http).unwrap();
        let started = Instant::now();
        client.rate_limit().await;
        client.rate_limit().await;
        assert!(started.elapsed() >= Duration::from_millis(50));
    }

    fn mock_http(server: &mockito::Server) -> HttpConfig {
        HttpConfig {
            api_url: format!("{}/api/query", server.url()),
            min_request_interval_ms: 0,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_search_against_mock_server() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/query")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("search_query".into(), "all:attention".into()),
                Matcher::UrlEncoded("max_results".into(), "5".into()),
                Matcher::UrlEncoded("sortBy".into(), "relevance".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/atom+xml")
            .with_body(SAMPLE_FEED)
            .expect(1)
            .create_async()
            .await;

        let client = ArxivClient::new(&mock_http(&server)).unwrap();
        let page = client.search(&request("attention")).await.unwrap();
        assert_eq!(page.total_results, 100);
        assert_eq!(page.papers.len(), 2);
        assert_eq!(page.papers[0].title, "Attention Is All You Need");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_search_maps_error_status() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/query")
            .match_query(Matcher::Any)
            .with_status(503)
            .with_body("Service Unavailable")
            .create_async()
            .await;

        let client = ArxivClient::new(&mock_http(&server)).unwrap();
        let err = client.search(&request("attention")).await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 503 }), "got {:?}", err);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_search_maps_connection_failure() {
        let http = HttpConfig {
            // Port 1 is reserved and has no listener.
            api_url: "http://127.0.0.1:1/api/query".to_string(),
            min_request_interval_ms: 0,
            connect_timeout_secs: 2,
            timeout_secs: 5,
            ..Default::default()
        };
        let client = ArxivClient::new(&http).unwrap();
        let err = client.search(&request("attention")).await.unwrap_err();
        assert!(matches!(err, FetchError::Request { .. }), "got {:?}", err);
    }

    // Integration tests (require network access)
    #[tokio::test]
    #[ignore]
    async fn test_real_search() {
        let client = ArxivClient::new(&HttpConfig::default()).unwrap();
        let page = client.search(&request("attention is all you need")).await.unwrap();
        assert!(!page.papers.is_empty());
    }
}
