use std::fmt::Write as _;

use serde_json::Value;

use crate::errors::RunError;
use crate::exports::{record_object, scalar_text, RunMetadata};
use crate::scraper::PropertyListing;

/// `<zillowListings>` document: a `<metadata>` element with one
/// text-coerced child per metadata key, then `<results>` with one
/// `<listing>` per record. List-valued fields become repeated `<item>`
/// children. No XML crate is involved; element names are the fixed
/// camelCase record keys and all text goes through the escaper.
pub fn export_xml(
    records: &[PropertyListing],
    metadata: &RunMetadata,
) -> Result<Vec<u8>, RunError> {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    xml.push_str("<zillowListings>");

    xml.push_str("<metadata>");
    let meta_value = serde_json::to_value(metadata).map_err(|e| RunError::Export(e.to_string()))?;
    if let Value::Object(meta) = meta_value {
        for (key, value) in &meta {
            let text = match value {
                Value::Array(items) => items
                    .iter()
                    .map(scalar_text)
                    .collect::<Vec<_>>()
                    .join(","),
                other => scalar_text(other),
            };
            let _ = write!(xml, "<{key}>{}</{key}>", escape_xml(&text));
        }
    }
    xml.push_str("</metadata>");

    xml.push_str("<results>");
    for record in records {
        xml.push_str("<listing>");
        for (key, value) in &record_object(record)? {
            match value {
                Value::Array(items) => {
                    let _ = write!(xml, "<{key}>");
                    for item in items {
                        let _ = write!(xml, "<item>{}</item>", escape_xml(&scalar_text(item)));
                    }
                    let _ = write!(xml, "</{key}>");
                }
                other => {
                    let _ = write!(xml, "<{key}>{}</{key}>", escape_xml(&scalar_text(other)));
                }
            }
        }
        xml.push_str("</listing>");
    }
    xml.push_str("</results>");

    xml.push_str("</zillowListings>\n");
    Ok(xml.into_bytes())
}

pub(crate) fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
