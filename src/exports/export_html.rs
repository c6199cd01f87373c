use maud::{html, PreEscaped, DOCTYPE};

use crate::exports::RunMetadata;
use crate::scraper::PropertyListing;

const COLUMNS: [&str; 9] = [
    "zpid",
    "statusType",
    "statusText",
    "address",
    "minPrice",
    "maxPrice",
    "latitude",
    "longitude",
    "detailUrl",
];

const STYLE: &str = "\
body { font-family: system-ui, sans-serif; margin: 1.5rem; color: #222; }\n\
h1 { font-size: 1.7rem; margin-bottom: 0.25rem; }\n\
h2 { font-size: 1rem; font-weight: 400; color: #555; margin-top: 0; }\n\
table { border-collapse: collapse; width: 100%; margin-top: 1rem; font-size: 0.9rem; }\n\
th, td { border: 1px solid #ddd; padding: 0.45rem 0.6rem; text-align: left; }\n\
th { background-color: #f5f5f5; font-weight: 600; }\n\
tr:nth-child(even) td { background-color: #fafafa; }\n\
a { color: #0066cc; text-decoration: none; }\n\
a:hover { text-decoration: underline; }\n";

/// Static results table. Cell text is escaped by maud; the detail URL is
/// rendered as a hyperlink instead of raw text.
pub fn export_html(records: &[PropertyListing], metadata: &RunMetadata) -> Vec<u8> {
    let opt = |v: &Option<String>| v.clone().unwrap_or_default();
    let num = |v: &Option<f64>| v.map(|n| n.to_string()).unwrap_or_default();

    let markup = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { "Zillow Listings Export" }
                meta name="viewport" content="width=device-width, initial-scale=1";
                style { (PreEscaped(STYLE)) }
            }
            body {
                h1 { "Zillow Listings Export" }
                h2 { (metadata.record_count) " listing(s)" }
                table {
                    thead {
                        tr {
                            @for col in COLUMNS {
                                th { (col) }
                            }
                        }
                    }
                    tbody {
                        @for record in records {
                            tr {
                                td { (opt(&record.zpid)) }
                                td { (opt(&record.status_type)) }
                                td { (opt(&record.status_text)) }
                                td { (opt(&record.address)) }
                                td { (opt(&record.min_price)) }
                                td { (opt(&record.max_price)) }
                                td { (num(&record.latitude)) }
                                td { (num(&record.longitude)) }
                                td {
                                    @if let Some(url) = &record.detail_url {
                                        a href=(url) { "Link" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    };

    markup.into_string().into_bytes()
}
