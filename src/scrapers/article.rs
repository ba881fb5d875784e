//! Article metadata extraction.
//!
//! Fetches one article page and runs every rule in [`super::rules`] against
//! the same parsed document. A fetch failure is returned to the caller, which
//! skips that article; missing markup only ever produces sentinel values.

use super::rules;
use crate::error::FetchError;
use crate::http::Fetcher;
use crate::models::ArticleMetadata;
use scraper::Html;
use tracing::{debug, info, instrument};

/// Apply all extraction rules to an article's HTML.
pub fn extract_from_html(html: &str) -> ArticleMetadata {
    let document = Html::parse_document(html);
    ArticleMetadata {
        title: rules::title(&document),
        summary: rules::summary(&document),
        publish_date: rules::publish_date(&document),
        article_image: rules::article_image(&document),
        article_content: rules::article_content(&document),
        image_credit: rules::image_credit(&document),
        tags: rules::tags(&document),
    }
}

/// Fetch and extract a single article.
///
/// # Errors
///
/// Returns the [`FetchError`] (URL and cause) when the page cannot be fetched.
#[instrument(level = "info", skip(fetcher))]
pub async fn extract(fetcher: &Fetcher, article_url: &str) -> Result<ArticleMetadata, FetchError> {
    info!("Scraping article");
    let html = fetcher.fetch_html(article_url).await?;
    let metadata = extract_from_html(&html);

    let missing = metadata.missing_fields();
    if !missing.is_empty() {
        debug!(?missing, "Some fields fell back to placeholders");
    }
    info!(title = %metadata.title, tags = %metadata.joined_tags(), "Extracted article metadata");
    Ok(metadata)
}
