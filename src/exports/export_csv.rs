use std::collections::HashSet;

use serde_json::Value;

use crate::errors::RunError;
use crate::exports::{record_object, scalar_text};
use crate::scraper::PropertyListing;

/// Flat CSV. Columns are the union of record keys in first-seen order;
/// list-valued fields are joined with `|`, null becomes empty text.
/// Zero records produce an empty file rather than an error.
pub fn export_csv(records: &[PropertyListing]) -> Result<Vec<u8>, RunError> {
    if records.is_empty() {
        return Ok(Vec::new());
    }

    let rows: Vec<_> = records
        .iter()
        .map(record_object)
        .collect::<Result<_, _>>()?;

    let mut columns: Vec<String> = Vec::new();
    let mut seen = HashSet::new();
    for row in &rows {
        for key in row.keys() {
            if seen.insert(key.clone()) {
                columns.push(key.clone());
            }
        }
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(&columns)
        .map_err(|e| RunError::Export(e.to_string()))?;

    for row in &rows {
        let cells: Vec<String> = columns.iter().map(|col| cell_text(row.get(col))).collect();
        writer
            .write_record(&cells)
            .map_err(|e| RunError::Export(e.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|e| RunError::Export(e.to_string()))
}

fn cell_text(value: Option<&Value>) -> String {
    match value {
        None => String::new(),
        Some(Value::Array(items)) => items
            .iter()
            .map(scalar_text)
            .collect::<Vec<_>>()
            .join("|"),
        Some(v) => scalar_text(v),
    }
}
