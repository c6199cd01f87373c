// run.rs

use std::fs;
use std::path::Path;

use chrono::Utc;
use tracing::{debug, error, info, warn};

use crate::config::{resolve_path, Config};
use crate::errors::RunError;
use crate::exports::{export_records, RunMetadata};
use crate::geos::{compute_centroid, haversine_distance_km};
use crate::scraper::{PageFetcher, PropertyListing, ZillowScraper};

/// Sweep every configured (city, listing type, page) combination in
/// order, aggregate the records, and write one output file. A failed
/// query is logged and skipped; only export and write problems abort.
pub fn run<F: PageFetcher>(
    scraper: &ZillowScraper<F>,
    config: &Config,
    base_dir: &Path,
) -> Result<(), RunError> {
    let search = &config.search;
    let output = &config.output;

    if search.cities.is_empty() {
        warn!("no cities defined in configuration, nothing to do");
        return Ok(());
    }

    info!(
        "starting Zillow scrape for {} city(ies), listing types={}, pages per city={}",
        search.cities.len(),
        search.listing_types.join(","),
        search.max_pages
    );

    let mut all_records: Vec<PropertyListing> = Vec::new();

    for city in &search.cities {
        for listing_type in &search.listing_types {
            for page in 1..=search.max_pages {
                info!("fetching city='{city}', listingType='{listing_type}', page={page}");
                match scraper.fetch_city_listings(
                    city,
                    listing_type,
                    &search.home_types,
                    page,
                    &search.language,
                ) {
                    Ok(records) => {
                        info!(
                            "fetched {} listing(s) for {city} [{listing_type}] page {page}",
                            records.len()
                        );
                        all_records.extend(records);
                    }
                    Err(e) => {
                        error!(
                            "failed to fetch listings for {city} [{listing_type}] page {page}: {e}"
                        );
                    }
                }
            }
        }
    }

    if all_records.is_empty() {
        warn!("no listings found for any query, exiting without export");
        return Ok(());
    }

    log_centroid(&all_records);

    let metadata = RunMetadata {
        generated_at: Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        city_count: search.cities.len(),
        listing_types: search.listing_types.clone(),
        record_count: all_records.len(),
    };

    let output_path = resolve_path(base_dir, &output.path);
    info!(
        "exporting {} record(s) to {} ({})",
        all_records.len(),
        output_path.display(),
        output.format
    );

    let bytes = export_records(&all_records, &output.format, &metadata)?;

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent).map_err(|e| RunError::WriteOutput {
            path: output_path.clone(),
            source: e,
        })?;
    }
    fs::write(&output_path, bytes).map_err(|e| RunError::WriteOutput {
        path: output_path.clone(),
        source: e,
    })?;

    info!("export complete");
    Ok(())
}

/// Summary statistic only: logged, never exported.
fn log_centroid(records: &[PropertyListing]) {
    let coords: Vec<(f64, f64)> = records
        .iter()
        .filter_map(|r| match (r.latitude, r.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        })
        .collect();

    if coords.is_empty() {
        return;
    }

    if let Ok((lat, lon)) = compute_centroid(&coords) {
        info!(
            "computed geographic centroid from {} coordinates: (lat={lat:.6}, lon={lon:.6})",
            coords.len()
        );

        let spread = coords
            .iter()
            .map(|&(c_lat, c_lon)| haversine_distance_km(lat, lon, c_lat, c_lon))
            .fold(0.0_f64, f64::max);
        debug!("farthest listing is {spread:.1} km from the centroid");
    }
}
