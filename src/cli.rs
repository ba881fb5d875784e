//! Command-line interface definitions.
//!
//! Three arguments are required: the site's base URL, the category path
//! segment, and the path of the CSV handoff file. Everything else overrides a
//! value from [`crate::config::ScraperConfig`].

use clap::Parser;

/// Command-line arguments for the category scraper.
///
/// # Examples
///
/// ```sh
/// # Collect links from https://www.bbc.com/culture, then extract every article
/// news_category_scraper --base-url https://www.bbc.com --category culture --csv-name bbc.csv
///
/// # Re-run extraction on an existing handoff file
/// news_category_scraper --base-url https://www.bbc.com --category culture \
///     --csv-name bbc.csv --extract-only
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Base URL of the news website (e.g. "https://www.bbc.com")
    #[arg(long, alias = "base_url")]
    pub base_url: String,

    /// Category path segment to scrape (e.g. "culture", "travel")
    #[arg(long)]
    pub category: String,

    /// Path of the CSV handoff file listing discovered article URLs
    #[arg(long, alias = "csv_name")]
    pub csv_name: String,

    /// Directory for per-article JSON files
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Optional path to a YAML config file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Maximum number of article fetches in flight
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Substring an anchor's href must contain to be treated as an article link
    #[arg(long)]
    pub link_pattern: Option<String>,

    /// Skip link collection and extract from an existing handoff file
    #[arg(long)]
    pub extract_only: bool,
}
