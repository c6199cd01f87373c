// fetch.rs

use std::time::Duration;

use reqwest::blocking::Client;
use tracing::error;

use crate::scraper::ScraperError;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0 Safari/537.36";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Downloads one search page. The seam exists so the batch run can be
/// driven against canned HTML in tests; production code uses
/// [`HttpFetcher`]. Single attempt, fail fast — the caller decides
/// whether the batch continues.
pub trait PageFetcher {
    fn fetch_page(&self, url: &str, language: &str) -> Result<String, ScraperError>;
}

/// Blocking reqwest client with a browser user agent. One instance is
/// shared for the whole run so the connection can be reused.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, ScraperError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ScraperError::ClientBuild(e.to_string()))?;

        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch_page(&self, url: &str, language: &str) -> Result<String, ScraperError> {
        let response = self
            .client
            .get(url)
            .header("Accept-Language", language)
            .send()
            .map_err(|e| {
                error!("HTTP error fetching {url}: {e}");
                ScraperError::Network {
                    url: url.to_string(),
                    source: e,
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            error!("HTTP {status} fetching {url}");
            return Err(ScraperError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response.text().map_err(|e| {
            error!("failed to read body from {url}: {e}");
            ScraperError::Network {
                url: url.to_string(),
                source: e,
            }
        })
    }
}
