//! Shared HTML fetching for both pipeline stages.
//!
//! One [`Fetcher`] owns one `reqwest::Client` configured with a browser
//! User-Agent and a fixed per-request timeout. There is no retry: a failed
//! request is final for that URL.

use crate::config::ScraperConfig;
use crate::error::FetchError;
use reqwest::Client;
use tracing::{debug, instrument};

#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(config: &ScraperConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout())
            .build()?;
        Ok(Self { client })
    }

    /// GET `url` and return the response body as text.
    ///
    /// Fails on any transport error, on timeout, and on a non-2xx status.
    #[instrument(level = "debug", skip(self))]
    pub async fn fetch_html(&self, url: &str) -> Result<String, FetchError> {
        let transport = |source| FetchError::Transport {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.text().await.map_err(transport)?;
        debug!(bytes = body.len(), %status, "Fetched page");
        Ok(body)
    }
}
