//! I/O operations for the backend document.
//!
//! This module reads the backend document from disk and writes it back
//! pretty-printed with 2-space indentation.

use crate::error::{Result, TimingUpdateError};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Default data file path, relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "src/utils/TN_DATA.json";

/// Read and parse a JSON document.
pub fn read_document(path: impl AsRef<Path>) -> Result<Value> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| TimingUpdateError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = content.len(), "Read backend document");

    serde_json::from_str(&content).map_err(|source| TimingUpdateError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Render a document the way it is stored on disk.
pub fn render_document(document: &Value) -> Result<String> {
    serde_json::to_string_pretty(document).map_err(TimingUpdateError::Serialize)
}

/// Write a document, replacing the file's previous contents.
///
/// The document is rendered before the file is opened, so a serialization
/// failure leaves the file untouched.
pub fn write_document(path: impl AsRef<Path>, document: &Value) -> Result<()> {
    let path = path.as_ref();
    let json = render_document(document)?;
    fs::write(path, &json).map_err(|source| TimingUpdateError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = json.len(), "Wrote backend document");
    Ok(())
}
