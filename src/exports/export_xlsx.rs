use rust_xlsxwriter::Workbook;

use crate::errors::RunError;
use crate::scraper::PropertyListing;

/// Spreadsheet rendition of the fixed results table. Coordinates stay
/// numeric cells; everything else is written as text.
pub fn export_xlsx(records: &[PropertyListing]) -> Result<Vec<u8>, RunError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    // Headers
    let headers = [
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

    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, *header)
            .map_err(|e| RunError::Export(format!("failed to write header '{header}': {e}")))?;
    }

    // Rows
    for (i, record) in records.iter().enumerate() {
        let r = (i + 1) as u32;

        let text_cells = [
            (0, record.zpid.as_deref()),
            (1, record.status_type.as_deref()),
            (2, record.status_text.as_deref()),
            (3, record.address.as_deref()),
            (4, record.min_price.as_deref()),
            (5, record.max_price.as_deref()),
            (8, record.detail_url.as_deref()),
        ];

        for (col, value) in text_cells {
            worksheet
                .write_string(r, col, value.unwrap_or(""))
                .map_err(|e| RunError::Export(format!("failed to write row {r}: {e}")))?;
        }

        if let Some(latitude) = record.latitude {
            worksheet
                .write_number(r, 6, latitude)
                .map_err(|e| RunError::Export(format!("failed to write latitude: {e}")))?;
        }
        if let Some(longitude) = record.longitude {
            worksheet
                .write_number(r, 7, longitude)
                .map_err(|e| RunError::Export(format!("failed to write longitude: {e}")))?;
        }
    }

    workbook
        .save_to_buffer()
        .map_err(|e| RunError::Export(format!("failed to save workbook: {e}")))
}
