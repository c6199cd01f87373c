use std::fs;

use serde_json::Value;

use crate::config::Config;
use crate::errors::RunError;
use crate::run::run;
use crate::scraper::ZillowScraper;
use crate::tests::utils::{
    next_data_page, sample_listings, search_state, FailingFetcher, FixtureFetcher,
};

fn fixture_scraper() -> ZillowScraper<FixtureFetcher> {
    ZillowScraper::new(FixtureFetcher {
        html: next_data_page(&search_state(sample_listings())),
    })
}

fn base_config(output_path: &str) -> Config {
    let mut config = Config::default();
    config.search.cities = vec!["Austin, TX".to_string()];
    config.output.path = output_path.to_string();
    config
}

#[test]
fn end_to_end_batch_writes_the_export() {
    let dir = tempfile::tempdir().unwrap();
    let config = base_config("out/listings.json");

    run(&fixture_scraper(), &config, dir.path()).unwrap();

    // parent directory is created on demand
    let text = fs::read_to_string(dir.path().join("out/listings.json")).unwrap();
    let value: Value = serde_json::from_str(&text).unwrap();

    assert_eq!(value["metadata"]["recordCount"], 3);
    assert_eq!(value["metadata"]["cityCount"], 1);
    assert_eq!(value["results"].as_array().unwrap().len(), 3);
}

#[test]
fn home_type_filter_applies_before_export() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = base_config("filtered.json");
    config.search.home_types = vec!["Apartment".to_string()];

    run(&fixture_scraper(), &config, dir.path()).unwrap();

    let text = fs::read_to_string(dir.path().join("filtered.json")).unwrap();
    let value: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["metadata"]["recordCount"], 2);
}

#[test]
fn csv_batch_writes_header_and_rows() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = base_config("listings.csv");
    config.output.format = "csv".to_string();

    run(&fixture_scraper(), &config, dir.path()).unwrap();

    let text = fs::read_to_string(dir.path().join("listings.csv")).unwrap();
    assert_eq!(text.lines().count(), 4);
}

#[test]
fn failed_queries_are_isolated_and_skip_the_export() {
    let dir = tempfile::tempdir().unwrap();
    let config = base_config("never.json");
    let scraper = ZillowScraper::new(FailingFetcher);

    // every query 403s, the run still finishes cleanly
    run(&scraper, &config, dir.path()).unwrap();

    assert!(!dir.path().join("never.json").exists());
}

#[test]
fn empty_city_list_is_a_noop() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = base_config("never.json");
    config.search.cities.clear();

    run(&fixture_scraper(), &config, dir.path()).unwrap();

    assert!(!dir.path().join("never.json").exists());
}

#[test]
fn unsupported_format_aborts_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = base_config("listings.yaml");
    config.output.format = "yaml".to_string();

    let err = run(&fixture_scraper(), &config, dir.path()).unwrap_err();
    assert!(matches!(err, RunError::UnsupportedFormat(_)));
}
