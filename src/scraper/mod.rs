mod extract;
mod fetch;
mod models;
mod scraper;
mod scraper_error;

pub use extract::parse_search_results;
pub use fetch::{HttpFetcher, PageFetcher};
pub use models::PropertyListing;
pub use scraper::{build_search_url, ZillowScraper};
pub use scraper_error::ScraperError;
