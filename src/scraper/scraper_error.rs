use thiserror::Error;

/// Failures while fetching a search page. Extraction problems are not
/// errors at all: a page with unusable state degrades to zero records.
#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),

    #[error("network error fetching {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} fetching {url}")]
    Status { status: u16, url: String },
}
