//! Pipeline driver: collection, handoff, and per-article extraction.
//!
//! The collection stage is all-or-nothing: if the category page cannot be
//! fetched, no handoff file is left behind. The extraction stage isolates
//! failures per article, so one bad page never stops the others from being
//! written.

use crate::config::ScraperConfig;
use crate::error::CollectError;
use crate::http::Fetcher;
use crate::models::LinkRecord;
use crate::outputs::{handoff, json};
use crate::scrapers::{article, links};
use crate::utils::file_timestamp;
use futures::stream::{self, StreamExt};
use std::error::Error;
use std::path::PathBuf;
use tracing::{error, info, instrument, warn};

/// Counts reported at the end of the extraction stage.
#[derive(Debug, Default)]
pub struct ExtractionSummary {
    pub written: Vec<PathBuf>,
    pub failed: Vec<String>,
}

/// Run link collection and persist the handoff file.
///
/// On [`links::CollectOutcome::NoLinksFound`] a header-only handoff file is
/// written so "ran but found nothing" stays distinguishable from a fatal
/// failure, which removes any stale file at `csv_path` and returns the error.
#[instrument(level = "info", skip(fetcher, config))]
pub async fn run_collection(
    fetcher: &Fetcher,
    config: &ScraperConfig,
    base_url: &str,
    category: &str,
    csv_path: &str,
) -> Result<Vec<LinkRecord>, Box<dyn Error>> {
    let pattern = &config.link_pattern;
    let outcome = match links::collect_links(fetcher, base_url, category, pattern).await {
        Ok(outcome) => outcome,
        Err(e) => {
            report_collection_failure(&e);
            if handoff::remove_stale(csv_path).await? {
                warn!(path = %csv_path, "Removed stale handoff file from an earlier run");
            }
            return Err(e.into());
        }
    };

    let records = match outcome {
        links::CollectOutcome::Links(records) => records,
        links::CollectOutcome::NoLinksFound { index_url } => {
            warn!(%index_url, "Category produced no article links; writing empty handoff file");
            Vec::new()
        }
    };
    handoff::write_links(csv_path, &records).await?;
    Ok(records)
}

fn report_collection_failure(e: &CollectError) {
    match e {
        CollectError::Fetch(fetch) => {
            error!(url = %fetch.url(), error = %e, "Error fetching category page")
        }
        CollectError::InvalidUrl { url, .. } => error!(%url, error = %e, "Invalid base URL"),
    }
}

/// Extract every record and write one JSON file per successful article.
///
/// Articles are fetched `config.concurrency` at a time. A fetch or write
/// failure is logged, counted, and skipped.
#[instrument(level = "info", skip_all, fields(count = records.len()))]
pub async fn run_extraction(
    fetcher: &Fetcher,
    config: &ScraperConfig,
    records: &[LinkRecord],
) -> ExtractionSummary {
    info!(output_dir = %config.output_dir, "Starting to process articles");

    let results: Vec<Result<PathBuf, String>> = stream::iter(records)
        .map(|record| async move {
            let metadata = match article::extract(fetcher, &record.url).await {
                Ok(metadata) => metadata,
                Err(e) => {
                    error!(url = %record.url, error = %e, "Failed to fetch article; skipping");
                    return Err(record.url.clone());
                }
            };
            json::write_article(
                &metadata,
                &config.output_dir,
                &record.site,
                &record.category,
                &file_timestamp(),
            )
            .await
            .map_err(|e| {
                error!(url = %record.url, error = %e, "Failed to save article metadata; skipping");
                record.url.clone()
            })
        })
        .buffer_unordered(config.concurrency.max(1))
        .collect()
        .await;

    let mut summary = ExtractionSummary::default();
    for result in results {
        match result {
            Ok(path) => summary.written.push(path),
            Err(url) => summary.failed.push(url),
        }
    }
    info!(
        written = summary.written.len(),
        failed = summary.failed.len(),
        "Completed article extraction"
    );
    summary
}
