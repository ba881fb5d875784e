//! Runtime configuration shared by the collector, the extractor, and the driver.
//!
//! Values come from three layers, highest precedence first:
//! command-line flags, an optional YAML file (`--config`), and built-in defaults.
//!
//! ```yaml
//! user_agent: "Mozilla/5.0 ..."
//! timeout_secs: 15
//! output_dir: json_output
//! link_pattern: /article/
//! concurrency: 1
//! ```

use crate::cli::Cli;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

pub const DEFAULT_USER_AGENT: &str = concat!(
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 ",
    "(KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
);
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_OUTPUT_DIR: &str = "json_output";
pub const DEFAULT_LINK_PATTERN: &str = "/article/";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Browser identification sent with every request.
    pub user_agent: String,
    /// Per-request timeout. A request that exceeds it fails; nothing is retried.
    pub timeout_secs: u64,
    /// Directory receiving one JSON document per article.
    pub output_dir: String,
    /// Substring an anchor's `href` must contain to count as an article link.
    pub link_pattern: String,
    /// Maximum number of article fetches in flight. `1` is strictly sequential.
    pub concurrency: usize,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            output_dir: DEFAULT_OUTPUT_DIR.to_string(),
            link_pattern: DEFAULT_LINK_PATTERN.to_string(),
            concurrency: 1,
        }
    }
}

impl ScraperConfig {
    /// Load a YAML config file. Keys absent from the file keep their defaults.
    #[instrument(level = "info")]
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_yaml(&raw).map_err(|source| ConfigError::Yaml {
            path: path.to_string(),
            source,
        })
    }

    fn from_yaml(raw: &str) -> Result<Self, serde_yaml::Error> {
        // An empty file deserializes to unit, not to a map.
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(raw)
    }

    /// Build the effective configuration for a CLI invocation.
    pub fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = match cli.config.as_deref() {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_overrides(cli);
        debug!(?config, "Resolved configuration");
        Ok(config)
    }

    fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(dir) = &cli.output_dir {
            self.output_dir = dir.clone();
        }
        if let Some(secs) = cli.timeout_secs {
            self.timeout_secs = secs;
        }
        if let Some(n) = cli.concurrency {
            self.concurrency = n;
        }
        if let Some(pattern) = &cli.link_pattern {
            self.link_pattern = pattern.clone();
        }
        self.concurrency = self.concurrency.max(1);
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
