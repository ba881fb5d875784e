//! # News Category Scraper
//!
//! Collects article links from one category page of a news website, saves
//! them to a CSV handoff file, then fetches every listed article and writes
//! its metadata (title, summary, publish date, image, body text, image credit,
//! tags) to a JSON file per article.
//!
//! ## Usage
//!
//! ```sh
//! news_category_scraper --base-url https://www.bbc.com --category culture \
//!     --csv-name bbc_articles.csv
//! ```
//!
//! ## Architecture
//!
//! The application runs two stages in sequence:
//! 1. **Collecting**: fetch the category page and write the unique article URLs
//!    to the handoff CSV (a failure here ends the run)
//! 2. **Extracting**: read the CSV back and extract each article (a failure here
//!    skips only that article)

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod error;
mod http;
mod models;
mod outputs;
mod pipeline;
mod scrapers;
mod utils;

use cli::Cli;
use config::ScraperConfig;
use http::Fetcher;
use outputs::handoff;
use utils::{ensure_writable_dir, truncate_for_log};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("news_category_scraper starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let config = ScraperConfig::resolve(&args)?;
    let fetcher = Fetcher::new(&config)?;

    // ---- Stage 1: collect links ----
    let collected = if args.extract_only {
        info!(path = %args.csv_name, "Skipping link collection; using existing handoff file");
        None
    } else {
        let records = pipeline::run_collection(
            &fetcher,
            &config,
            &args.base_url,
            &args.category,
            &args.csv_name,
        )
        .await?;
        Some(records.len())
    };

    if collected == Some(0) {
        warn!("No articles to extract");
        info!(elapsed = ?start_time.elapsed(), "Execution complete");
        return Ok(());
    }

    // ---- Stage 2: extract articles ----
    if let Err(e) = ensure_writable_dir(&config.output_dir).await {
        error!(
            path = %config.output_dir,
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e.into());
    }

    let records = handoff::read_links(&args.csv_name).await?;
    let summary = pipeline::run_extraction(&fetcher, &config, &records).await;

    if !summary.failed.is_empty() {
        let failed = summary.failed.join(", ");
        warn!(
            count = summary.failed.len(),
            urls = %truncate_for_log(&failed, 500),
            "Some articles were skipped"
        );
    }

    let elapsed = start_time.elapsed();
    info!(
        links = records.len(),
        written = summary.written.len(),
        failed = summary.failed.len(),
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
