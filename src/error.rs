//! Error types for fetching, collecting, and persisting articles.
//!
//! Missing HTML structure is never an error here: the extraction rules absorb
//! it into sentinel values (see [`crate::models::ArticleMetadata`]). Errors are
//! reserved for transport failures, bad input, and I/O.

use thiserror::Error;

/// A single HTTP GET that did not produce a usable body.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, TLS, timeout, or body-read failure.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-2xx status.
    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
}

impl FetchError {
    /// The URL of the failed request.
    pub fn url(&self) -> &str {
        match self {
            FetchError::Transport { url, .. } | FetchError::Status { url, .. } => url,
        }
    }
}

/// Failures of the link-collection stage. All of them abort the run.
#[derive(Debug, Error)]
pub enum CollectError {
    #[error("invalid base URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Reading or writing the CSV handoff file.
#[derive(Debug, Error)]
pub enum HandoffError {
    #[error("handoff file I/O on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("handoff file {path} has no {column:?} column")]
    MissingColumn { path: String, column: &'static str },

    #[error("handoff file {path} is malformed: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
}

/// Writing or reading a per-article JSON document.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("output I/O on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("article JSON for {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Loading the optional YAML configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config {path}: {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_names_url_and_status() {
        let err = FetchError::Status {
            url: "https://example.com/article/a".to_string(),
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        };
        let msg = err.to_string();
        assert!(msg.contains("https://example.com/article/a"));
        assert!(msg.contains("500"));
        assert_eq!(err.url(), "https://example.com/article/a");
    }

    #[test]
    fn test_collect_error_is_transparent_over_fetch() {
        let err: CollectError = FetchError::Status {
            url: "https://example.com/culture".to_string(),
            status: reqwest::StatusCode::NOT_FOUND,
        }
        .into();
        assert_eq!(err.to_string(), "https://example.com/culture returned HTTP 404 Not Found");
    }
}
