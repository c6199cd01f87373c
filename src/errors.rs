// errors.rs

use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort the run after configuration loaded. Per-query
/// fetch errors never reach this type — they are logged and the sweep
/// continues.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("unsupported export format: {0}")]
    UnsupportedFormat(String),

    #[error("export failed: {0}")]
    Export(String),

    #[error("failed to write output {path}: {source}")]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
