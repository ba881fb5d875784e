//! Link collection from a single category index page.
//!
//! # URL Pattern
//!
//! Any anchor whose `href` contains the configured pattern (default
//! `/article/`) counts as an article link. The match is deliberately loose so
//! unknown path prefixes across categories still qualify; navigation links that
//! happen to contain the pattern are accepted too.
//!
//! Hrefs are resolved against the site's base URL (not the category page) and
//! deduplicated by exact string, keeping first-seen order.

use crate::error::CollectError;
use crate::http::Fetcher;
use crate::models::LinkRecord;
use itertools::Itertools;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::{debug, info, instrument, warn};
use url::Url;

static ANCHOR_WITH_HREF: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("static selector is valid"));

/// Result of a collection run that reached the index page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectOutcome {
    /// At least one anchor matched; records are unique and in first-seen order.
    Links(Vec<LinkRecord>),
    /// The page was fetched but no anchor matched the pattern.
    NoLinksFound { index_url: String },
}

/// Index page URL for `category` under `base`.
///
/// The category is appended as a path segment even when `base` has a path
/// without a trailing slash.
pub fn category_url(base: &Url, category: &str) -> Result<Url, url::ParseError> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(category.trim_start_matches('/'))
}

/// Extract unique article links from an already-fetched index page.
pub fn links_from_html(
    html: &str,
    base: &Url,
    site: &str,
    category: &str,
    pattern: &str,
) -> Vec<LinkRecord> {
    let document = Html::parse_document(html);
    document
        .select(&ANCHOR_WITH_HREF)
        .filter_map(|anchor| anchor.value().attr("href"))
        .filter(|href| href.contains(pattern))
        .filter_map(|href| match base.join(href) {
            Ok(resolved) => Some(resolved.to_string()),
            Err(e) => {
                debug!(%href, error = %e, "Skipping unresolvable href");
                None
            }
        })
        .unique()
        .map(|url| LinkRecord {
            site: site.to_string(),
            category: category.to_string(),
            url,
        })
        .collect()
}

/// Fetch the category page and collect its article links.
///
/// # Errors
///
/// [`CollectError::InvalidUrl`] when `base_url` is not an absolute URL, and
/// [`CollectError::Fetch`] when the index page cannot be fetched. Both are
/// fatal for the run. An index page without matching anchors is not an error;
/// it yields [`CollectOutcome::NoLinksFound`].
#[instrument(level = "info", skip(fetcher))]
pub async fn collect_links(
    fetcher: &Fetcher,
    base_url: &str,
    category: &str,
    pattern: &str,
) -> Result<CollectOutcome, CollectError> {
    let invalid = |source| CollectError::InvalidUrl {
        url: base_url.to_string(),
        source,
    };
    let base = Url::parse(base_url).map_err(invalid)?;
    let index_url = category_url(&base, category).map_err(invalid)?;

    info!(%index_url, "Scraping category page");
    let html = fetcher.fetch_html(index_url.as_str()).await?;

    let records = links_from_html(&html, &base, base_url, category, pattern);
    if records.is_empty() {
        warn!(
            %index_url,
            pattern,
            "No article links found; the site structure or link pattern may have changed"
        );
        return Ok(CollectOutcome::NoLinksFound {
            index_url: index_url.to_string(),
        });
    }

    info!(count = records.len(), %index_url, "Collected article links");
    debug!(urls = ?records.iter().map(|r| &r.url).collect::<Vec<_>>(), "Article URLs");
    Ok(CollectOutcome::Links(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScraperConfig;
    use crate::error::FetchError;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const INDEX: &str = r#"<html><body>
        <nav><a href="/news">News</a></nav>
        <a href="/article/a">A</a>
        <a href="/article/a">A again</a>
        <a href="https://example.com/culture/article/b">B</a>
        <a>no href</a>
        <a href="/video/c">C</a>
    </body></html>"#;

    fn example_base() -> Url {
        Url::parse("https://example.com").unwrap()
    }

    #[test]
    fn test_category_url_appends_segment() {
        let base = example_base();
        assert_eq!(
            category_url(&base, "culture").unwrap().as_str(),
            "https://example.com/culture"
        );

        let nested = Url::parse("https://example.com/news").unwrap();
        assert_eq!(
            category_url(&nested, "/world").unwrap().as_str(),
            "https://example.com/news/world"
        );
    }

    #[test]
    fn test_links_dedup_in_first_seen_order() {
        let records = links_from_html(
            INDEX,
            &example_base(),
            "https://example.com",
            "culture",
            "/article/",
        );
        let urls: Vec<_> = records.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://example.com/article/a",
                "https://example.com/culture/article/b"
            ]
        );
        assert!(
            records
                .iter()
                .all(|r| r.site == "https://example.com" && r.category == "culture")
        );
    }

    #[test]
    fn test_relative_and_absolute_duplicates_collapse() {
        let html = r#"<a href="/article/x">1</a><a href="https://example.com/article/x">2</a>"#;
        let site = "https://example.com";
        let records = links_from_html(html, &example_base(), site, "c", "/article/");
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_custom_pattern() {
        let records = links_from_html(
            INDEX,
            &example_base(),
            "https://example.com",
            "culture",
            "/video/",
        );
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].url, "https://example.com/video/c");
    }

    #[tokio::test]
    async fn test_collect_links_from_server() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/culture"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"<a href="/article/a">a</a><a href="/article/a">a</a><a href="/article/b">b</a>"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let fetcher = Fetcher::new(&ScraperConfig::default()).unwrap();
        let outcome = collect_links(&fetcher, &server.uri(), "culture", "/article/")
            .await
            .unwrap();

        let records = match outcome {
            CollectOutcome::Links(records) => records,
            other => panic!("expected links, got {other:?}"),
        };
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].url, format!("{}/article/a", server.uri()));
        assert_eq!(records[1].url, format!("{}/article/b", server.uri()));
        assert_eq!(records[0].site, server.uri());
    }

    #[tokio::test]
    async fn test_collect_links_none_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/travel"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string("<a href=\"/about\">About</a>"),
            )
            .mount(&server)
            .await;

        let fetcher = Fetcher::new(&ScraperConfig::default()).unwrap();
        let outcome = collect_links(&fetcher, &server.uri(), "travel", "/article/")
            .await
            .unwrap();
        assert_eq!(
            outcome,
            CollectOutcome::NoLinksFound {
                index_url: format!("{}/travel", server.uri())
            }
        );
    }

    #[tokio::test]
    async fn test_collect_links_fetch_failure_is_fatal() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let fetcher = Fetcher::new(&ScraperConfig::default()).unwrap();
        let err = collect_links(&fetcher, &server.uri(), "culture", "/article/")
            .await
            .unwrap_err();
        assert!(matches!(err, CollectError::Fetch(FetchError::Status { .. })));
    }

    #[tokio::test]
    async fn test_collect_links_rejects_relative_base() {
        let fetcher = Fetcher::new(&ScraperConfig::default()).unwrap();
        let err = collect_links(&fetcher, "example.com", "culture", "/article/")
            .await
            .unwrap_err();
        assert!(matches!(err, CollectError::InvalidUrl { .. }));
    }
}
