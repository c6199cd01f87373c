mod export_csv;
mod export_html;
mod export_json;
mod export_rss;
mod export_xlsx;
mod export_xml;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::errors::RunError;
use crate::scraper::PropertyListing;

pub use export_csv::export_csv;
pub use export_html::export_html;
pub use export_json::export_json;
pub use export_rss::export_rss;
pub use export_xlsx::export_xlsx;
pub use export_xml::export_xml;

/// Context attached to every export; not persisted anywhere else.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunMetadata {
    pub generated_at: String,
    pub city_count: usize,
    pub listing_types: Vec<String>,
    pub record_count: usize,
}

/// Serialize the record list in the requested format. Format names are
/// matched case-insensitively; anything unrecognized is fatal.
pub fn export_records(
    records: &[PropertyListing],
    fmt: &str,
    metadata: &RunMetadata,
) -> Result<Vec<u8>, RunError> {
    match fmt.to_lowercase().as_str() {
        "json" => export_json(records, metadata),
        "csv" => export_csv(records),
        "xml" => export_xml(records, metadata),
        "rss" => Ok(export_rss(records, metadata)),
        "html" => Ok(export_html(records, metadata)),
        "xlsx" => export_xlsx(records),
        other => Err(RunError::UnsupportedFormat(other.to_string())),
    }
}

/// View of a record as an ordered key → value map, for the exporters
/// that walk keys generically (csv, xml).
pub(crate) fn record_object(record: &PropertyListing) -> Result<Map<String, Value>, RunError> {
    match serde_json::to_value(record).map_err(|e| RunError::Export(e.to_string()))? {
        Value::Object(map) => Ok(map),
        _ => Err(RunError::Export("record did not serialize to an object".to_string())),
    }
}

/// Text form of a scalar JSON value; null becomes empty text.
pub(crate) fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
