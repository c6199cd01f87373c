// scraper.rs

use tracing::{debug, info, warn};

use crate::scraper::extract::parse_search_results;
use crate::scraper::fetch::PageFetcher;
use crate::scraper::models::PropertyListing;
use crate::scraper::ScraperError;

const BASE_URL: &str = "https://www.zillow.com";

/// Search client: builds page URLs and turns one fetched page into
/// normalized records. Generic over the fetcher so tests can feed it
/// fixture HTML.
pub struct ZillowScraper<F: PageFetcher> {
    fetcher: F,
}

/// Deterministic mapping from (city, listing type, page) to a search
/// URL. Page 1 has no page segment; later pages append `{page}_p/`.
pub fn build_search_url(city: &str, listing_type: &str, page: u32) -> String {
    let slug_city = city.to_lowercase().replace(',', "").replace(' ', "-");

    let category = match listing_type.to_lowercase().as_str() {
        "for_rent" | "for-rent" | "rent" => "for_rent",
        "for_sale" | "for-sale" | "sale" => "for_sale",
        "sold" | "recently_sold" | "recently-sold" => "recently_sold",
        other => {
            warn!("unknown listing type '{other}', defaulting to for_rent");
            "for_rent"
        }
    };

    let mut url = format!("{BASE_URL}/homes/{category}/{slug_city}_rb/");
    if page > 1 {
        url = format!("{url}{page}_p/");
    }
    debug!("built search URL: {url}");
    url
}

impl<F: PageFetcher> ZillowScraper<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// High-level helper: build the URL, download the page, parse the
    /// results, and apply the optional home-type filter.
    pub fn fetch_city_listings(
        &self,
        city: &str,
        listing_type: &str,
        home_types: &[String],
        page: u32,
        language: &str,
    ) -> Result<Vec<PropertyListing>, ScraperError> {
        let url = build_search_url(city, listing_type, page);
        let html = self.fetcher.fetch_page(&url, language)?;
        let records = parse_search_results(&html);

        if records.is_empty() {
            info!("no records parsed for {city} [{listing_type}] page {page}");
            return Ok(records);
        }

        if home_types.is_empty() {
            return Ok(records);
        }

        Ok(filter_by_home_types(records, home_types))
    }
}

/// Keep records whose unit-type descriptor contains any configured home
/// type, case-insensitively. Records without a descriptor are dropped.
fn filter_by_home_types(
    records: Vec<PropertyListing>,
    home_types: &[String],
) -> Vec<PropertyListing> {
    let normalized: Vec<String> = home_types.iter().map(|ht| ht.to_lowercase()).collect();

    let before = records.len();
    let filtered: Vec<PropertyListing> = records
        .into_iter()
        .filter(|record| {
            let unit_types = record
                .unit_types
                .as_deref()
                .unwrap_or_default()
                .to_lowercase();
            normalized.iter().any(|ht| unit_types.contains(ht.as_str()))
        })
        .collect();

    debug!(
        "filtered {before} -> {} listing(s) by home types {}",
        filtered.len(),
        home_types.join(",")
    );
    filtered
}
