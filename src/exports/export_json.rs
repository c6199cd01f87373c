use serde::Serialize;

use crate::errors::RunError;
use crate::exports::RunMetadata;
use crate::scraper::PropertyListing;

#[derive(Serialize)]
struct Envelope<'a> {
    metadata: &'a RunMetadata,
    results: &'a [PropertyListing],
}

/// `{ "metadata": ..., "results": [...] }`, pretty-printed.
pub fn export_json(
    records: &[PropertyListing],
    metadata: &RunMetadata,
) -> Result<Vec<u8>, RunError> {
    let envelope = Envelope {
        metadata,
        results: records,
    };
    serde_json::to_vec_pretty(&envelope).map_err(|e| RunError::Export(e.to_string()))
}
