//! CSV handoff file between link collection and article extraction.
//!
//! # Format
//!
//! ```text
//! website,category,article_url
//! https://www.bbc.com,culture,https://www.bbc.com/culture/article/20250101-example
//! ```
//!
//! UTF-8, one row per [`LinkRecord`] in discovery order, written and read with
//! the `csv` crate (RFC 4180 quoting). The reader finds columns by header
//! name, so extra or reordered columns are fine; `article_url` is required.

use crate::error::HandoffError;
use crate::models::LinkRecord;
use csv::{ReaderBuilder, Terminator, Trim, WriterBuilder};
use serde::Deserialize;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

pub const HEADER: [&str; 3] = ["website", "category", "article_url"];

#[derive(Debug, Deserialize)]
struct HandoffRow {
    #[serde(default)]
    website: String,
    #[serde(default)]
    category: String,
    article_url: String,
}

/// Render records as CSV, header first. The header is written even when
/// there are no records.
pub fn to_csv(records: &[LinkRecord]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(HEADER)?;
    for record in records {
        writer.write_record([&record.site, &record.category, &record.url])?;
    }
    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}

/// Parse CSV produced by [`to_csv`] (or any compatible writer).
///
/// Blank lines are skipped, and so are rows with an empty `article_url`.
/// `site` and `category` default to empty when their columns are absent.
pub fn from_csv(data: &[u8], path: &str) -> Result<Vec<LinkRecord>, HandoffError> {
    let malformed = |source| HandoffError::Csv {
        path: path.to_string(),
        source,
    };
    let mut reader = ReaderBuilder::new()
        .trim(Trim::Headers)
        .from_reader(data);

    let headers = reader.headers().map_err(malformed)?;
    if !headers.iter().any(|h| h == "article_url") {
        return Err(HandoffError::MissingColumn {
            path: path.to_string(),
            column: "article_url",
        });
    }

    let mut records = Vec::new();
    for row in reader.deserialize::<HandoffRow>() {
        let row = row.map_err(malformed)?;
        if row.article_url.trim().is_empty() {
            continue;
        }
        records.push(LinkRecord {
            site: row.website,
            category: row.category,
            url: row.article_url,
        });
    }
    Ok(records)
}

/// Write the handoff file, replacing any existing file at `path`.
#[instrument(level = "info", skip(records), fields(count = records.len()))]
pub async fn write_links(path: &str, records: &[LinkRecord]) -> Result<(), HandoffError> {
    if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .map_err(|source| HandoffError::Io {
                path: path.to_string(),
                source,
            })?;
    }
    let body = to_csv(records).map_err(|source| HandoffError::Csv {
        path: path.to_string(),
        source,
    })?;
    fs::write(path, body)
        .await
        .map_err(|source| HandoffError::Io {
            path: path.to_string(),
            source,
        })?;
    info!(%path, "Saved article URLs");
    Ok(())
}

/// Read the handoff file back into records, preserving row order.
#[instrument(level = "info")]
pub async fn read_links(path: &str) -> Result<Vec<LinkRecord>, HandoffError> {
    let data = fs::read(path).await.map_err(|source| HandoffError::Io {
        path: path.to_string(),
        source,
    })?;
    let records = from_csv(&data, path)?;
    info!(count = records.len(), "Loaded article URLs");
    Ok(records)
}

/// Remove a handoff file left over from an earlier run, if any.
#[instrument(level = "info")]
pub async fn remove_stale(path: &str) -> Result<bool, HandoffError> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(HandoffError::Io {
            path: path.to_string(),
            source,
        }),
    }
}
