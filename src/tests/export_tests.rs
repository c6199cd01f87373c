use serde_json::Value;

use crate::errors::RunError;
use crate::exports::{
    export_csv, export_html, export_json, export_records, export_rss, export_xlsx, export_xml,
    RunMetadata,
};
use crate::scraper::PropertyListing;

fn sample_record() -> PropertyListing {
    PropertyListing {
        zpid: Some("11111".to_string()),
        status_type: Some("FOR_RENT".to_string()),
        status_text: Some("Apartment for rent".to_string()),
        detail_url: Some("https://www.zillow.com/apartments/one/".to_string()),
        address: Some("101 Congress Ave & 2nd, Austin, TX, 78701".to_string()),
        min_price: Some("$1,850+/mo".to_string()),
        latitude: Some(30.2672),
        longitude: Some(-97.7431),
        photo_urls: vec![
            "https://photos.example.com/x.jpg".to_string(),
            "https://photos.example.com/y.jpg".to_string(),
        ],
        ..Default::default()
    }
}

fn metadata(record_count: usize) -> RunMetadata {
    RunMetadata {
        generated_at: "2026-08-06T12:00:00Z".to_string(),
        city_count: 1,
        listing_types: vec!["for_rent".to_string()],
        record_count,
    }
}

#[test]
fn json_export_embeds_metadata_and_results() {
    let records = vec![sample_record()];
    let bytes = export_json(&records, &metadata(1)).unwrap();
    let value: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(value["metadata"]["recordCount"], 1);
    assert_eq!(value["metadata"]["cityCount"], 1);
    let results = value["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["zpid"], "11111");
    assert!(results[0]["photoUrls"].is_array());
    // absent scalars serialize as null, not as missing keys
    assert!(results[0]["buildingName"].is_null());
}

#[test]
fn csv_export_joins_lists_and_blanks_nulls() {
    let records = vec![sample_record()];
    let bytes = export_csv(&records).unwrap();
    let text = String::from_utf8(bytes).unwrap();
    let mut lines = text.lines();

    let header = lines.next().unwrap();
    assert!(header.starts_with("zpid,providerListingId,statusType"));
    assert!(header.contains("photoUrls"));

    let row = lines.next().unwrap();
    assert!(row.starts_with("11111,"));
    assert!(row.contains("https://photos.example.com/x.jpg|https://photos.example.com/y.jpg"));
    // the comma-bearing composite address must arrive quoted
    assert!(row.contains("\"101 Congress Ave & 2nd, Austin, TX, 78701\""));
    assert!(lines.next().is_none());
}

#[test]
fn csv_export_of_zero_records_is_an_empty_file() {
    let bytes = export_csv(&[]).unwrap();
    assert!(bytes.is_empty());
}

#[test]
fn xml_export_escapes_text_and_repeats_list_items() {
    let records = vec![sample_record()];
    let bytes = export_xml(&records, &metadata(1)).unwrap();
    let text = String::from_utf8(bytes).unwrap();

    assert!(text.starts_with("<?xml version=\"1.0\""));
    assert!(text.contains("<zillowListings>"));
    assert!(text.contains("<recordCount>1</recordCount>"));
    assert!(text.contains("<listingTypes>for_rent</listingTypes>"));
    assert!(text.contains("101 Congress Ave &amp; 2nd"));
    assert!(text.contains("<item>https://photos.example.com/x.jpg</item>"));
    assert!(text.contains("<item>https://photos.example.com/y.jpg</item>"));
    // null scalar fields become empty elements
    assert!(text.contains("<buildingName></buildingName>"));
}

#[test]
fn rss_export_escapes_and_formats_rfc822_dates() {
    let records = vec![sample_record()];
    let bytes = export_rss(&records, &metadata(1));
    let text = String::from_utf8(bytes).unwrap();

    assert!(text.contains("<rss version=\"2.0\">"));
    assert!(text.contains("Zillow Listings Export (1 results)"));
    assert!(text.contains("<title>Apartment for rent - 101 Congress Ave &amp; 2nd, Austin, TX, 78701</title>"));
    assert!(text.contains("<guid isPermaLink=\"false\">11111</guid>"));
    assert!(text.contains("06 Aug 2026 12:00:00 +0000"));
    assert!(text.contains("Price: $1,850+/mo"));
}

#[test]
fn rss_guid_falls_back_to_the_detail_url() {
    let record = PropertyListing {
        detail_url: Some("https://www.zillow.com/apartments/two/".to_string()),
        ..Default::default()
    };
    let bytes = export_rss(&[record], &metadata(1));
    let text = String::from_utf8(bytes).unwrap();

    assert!(text
        .contains("<guid isPermaLink=\"false\">https://www.zillow.com/apartments/two/</guid>"));
}

#[test]
fn html_export_renders_an_escaped_table_with_links() {
    let records = vec![sample_record()];
    let bytes = export_html(&records, &metadata(1));
    let text = String::from_utf8(bytes).unwrap();

    assert!(text.starts_with("<!DOCTYPE html>"));
    assert!(text.contains("<table>"));
    assert!(text.contains("1 listing(s)"));
    assert!(text.contains("101 Congress Ave &amp; 2nd"));
    assert!(text.contains("<a href=\"https://www.zillow.com/apartments/one/\">Link</a>"));
}

#[test]
fn xlsx_export_produces_a_workbook() {
    let records = vec![sample_record()];
    let bytes = export_xlsx(&records).unwrap();
    // xlsx is a zip container
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn unknown_format_is_rejected() {
    let err = export_records(&[sample_record()], "yaml", &metadata(1)).unwrap_err();
    assert!(matches!(err, RunError::UnsupportedFormat(f) if f == "yaml"));
}

#[test]
fn format_names_match_case_insensitively() {
    let bytes = export_records(&[sample_record()], "JSON", &metadata(1)).unwrap();
    assert!(serde_json::from_slice::<Value>(&bytes).is_ok());
}
