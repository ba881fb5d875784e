//! Utility functions for output naming, logging, and file system checks.
//!
//! - Filesystem-safe name fragments for per-article output files
//! - Timestamps for output file names
//! - String truncation for logging
//! - Output directory validation

use chrono::Local;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs as stdfs;
use std::io;
use tokio::fs;
use tracing::{info, instrument};
use url::Url;

static UNSAFE_NAME_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w-]").expect("static regex is valid"));

/// Maximum length, in characters, of the title fragment of an output file name.
pub const TITLE_FRAGMENT_LEN: usize = 50;

/// Replace every character that is not a word character or `-` with `_`.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(sanitize_name("Hello, World!"), "Hello__World_");
/// ```
pub fn sanitize_name(s: &str) -> String {
    UNSAFE_NAME_CHARS.replace_all(s, "_").into_owned()
}

/// Sanitized title truncated to [`TITLE_FRAGMENT_LEN`] characters.
pub fn safe_title(title: &str) -> String {
    sanitize_name(title)
        .chars()
        .take(TITLE_FRAGMENT_LEN)
        .collect()
}

/// Short site name for output file names.
///
/// The host of `base_url` without a leading `www.`, dots replaced by `_`:
/// `https://www.bbc.com` becomes `bbc_com`. Falls back to the sanitized input
/// when it has no host.
pub fn site_slug(base_url: &str) -> String {
    match Url::parse(base_url).ok().and_then(|u| u.host_str().map(str::to_string)) {
        Some(host) => host
            .trim_start_matches("www.")
            .replace('.', "_"),
        None => sanitize_name(base_url),
    }
}

/// Local time with second resolution, as used in output file names.
pub fn file_timestamp() -> String {
    Local::now().format("%Y%m%d%H%M%S").to_string()
}

/// Truncate a string for logging purposes.
///
/// Long strings are truncated to at most `max` bytes (backing off to a char
/// boundary) with an ellipsis and byte count indicator appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…(+{} bytes)", &s[..end], s.len() - end)
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if it doesn't exist, then performs a write test by
/// creating and immediately deleting a scratch file.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> io::Result<()> {
    fs::create_dir_all(path).await?;
    let scratch_path = format!("{}/..__write_check__", path.trim_end_matches('/'));
    stdfs::File::create(&scratch_path)?;
    let _ = stdfs::remove_file(&scratch_path);
    info!("Output directory is writable");
    Ok(())
}
