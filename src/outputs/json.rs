//! Per-article JSON output.
//!
//! # Output Structure
//!
//! ```text
//! json_output/
//! ├── bbc_com_culture_Why_we_still_read_paper_maps_20250304091500.json
//! └── bbc_com_culture_Title_not_found_20250304091502.json
//! ```
//!
//! File names are `{site}_{category}_{title}_{timestamp}.json`, built from
//! sanitized fragments (see [`crate::utils`]). The timestamp has second
//! resolution. Files are never overwritten: when the name is taken (same title
//! in the same second, e.g. several pages without an `<h1>`), a numeric suffix
//! is added: `..._{timestamp}_2.json`, `..._{timestamp}_3.json`.
//!
//! Documents are pretty-printed with a 4-space indent and non-ASCII text is
//! written as-is. Text fields hold whitespace-normalized element text, so
//! `<p>Image credit: <b>Jane</b></p>` is stored as `"Image credit: Jane"`,
//! with a space between text pieces rather than `"Image credit:Jane"`.

use crate::error::OutputError;
use crate::models::ArticleMetadata;
use crate::utils::{safe_title, sanitize_name, site_slug};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, instrument};

/// Output file name for an article.
pub fn article_filename(site: &str, category: &str, title: &str, timestamp: &str) -> String {
    format!("{}.json", article_stem(site, category, title, timestamp))
}

fn article_stem(site: &str, category: &str, title: &str, timestamp: &str) -> String {
    format!(
        "{}_{}_{}_{}",
        site_slug(site),
        sanitize_name(category),
        safe_title(title),
        timestamp
    )
}

/// Serialize an article the way it is stored on disk.
pub fn to_json(article: &ArticleMetadata) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);
    article.serialize(&mut serializer)?;
    Ok(buf)
}

/// Write an article into `output_dir`, creating the directory if needed.
///
/// An existing file is never replaced; a free `_2`, `_3`, ... suffix is
/// picked instead, so concurrent writers always end up with distinct files.
///
/// # Returns
///
/// The path of the written file.
#[instrument(level = "info", skip(article), fields(title = %article.title))]
pub async fn write_article(
    article: &ArticleMetadata,
    output_dir: &str,
    site: &str,
    category: &str,
    timestamp: &str,
) -> Result<PathBuf, OutputError> {
    fs::create_dir_all(output_dir)
        .await
        .map_err(|source| OutputError::Io {
            path: output_dir.to_string(),
            source,
        })?;

    let stem = article_stem(site, category, &article.title, timestamp);
    let body = to_json(article).map_err(|source| OutputError::Json {
        path: format!("{output_dir}/{stem}.json"),
        source,
    })?;

    let mut attempt = 1usize;
    loop {
        let name = if attempt == 1 {
            format!("{stem}.json")
        } else {
            format!("{stem}_{attempt}.json")
        };
        let path = Path::new(output_dir).join(name);
        let shown = path.display().to_string();
        let io_err = |source| OutputError::Io {
            path: shown.clone(),
            source,
        };

        let mut file = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                debug!(path = %shown, "Output name taken; trying next suffix");
                attempt += 1;
                continue;
            }
            Err(e) => return Err(io_err(e)),
        };
        file.write_all(&body).await.map_err(io_err)?;
        file.flush().await.map_err(io_err)?;

        info!(path = %shown, "Saved article metadata");
        return Ok(path);
    }
}

/// Read a previously written article document.
#[cfg(test)]
#[instrument(level = "debug")]
pub async fn read_article(path: &Path) -> Result<ArticleMetadata, OutputError> {
    let shown = path.display().to_string();
    let raw = fs::read(path).await.map_err(|source| OutputError::Io {
        path: shown.clone(),
        source,
    })?;
    serde_json::from_slice(&raw).map_err(|source| OutputError::Json {
        path: shown,
        source,
    })
}
