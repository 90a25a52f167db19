//! Network retrieval of published rate pages.

use std::time::Duration;

use reqwest::blocking::Client;
use tracing::debug;

use crate::error::{IngestError, Result};

/// Fetch a URL and return its body as text.
///
/// Implemented by [`HttpFetcher`] for live retrieval; tests substitute
/// canned pages.
pub trait TableFetcher {
    fn fetch(&self, url: &str) -> Result<String>;
}

/// Blocking HTTP client with a bounded timeout and a fixed User-Agent.
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|source| IngestError::Client { source })?;
        Ok(Self { client, timeout })
    }

    fn classify(&self, url: &str, source: reqwest::Error) -> IngestError {
        if source.is_timeout() {
            IngestError::Timeout {
                url: url.to_string(),
                timeout_secs: self.timeout.as_secs(),
            }
        } else {
            IngestError::Fetch {
                url: url.to_string(),
                source,
            }
        }
    }
}

impl TableFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        debug!(url, timeout_secs = self.timeout.as_secs(), "fetching rate table");

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| self.classify(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(IngestError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().map_err(|e| self.classify(url, e))?;
        debug!(url, bytes = bytes.len(), "fetched rate table");
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
