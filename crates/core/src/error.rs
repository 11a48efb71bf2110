// Copyright 2025 TN Timing Contributors
// SPDX-License-Identifier: Apache-2.0

//! Error types for loading, annotating and saving the backend document.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while updating the backend document.
///
/// Every variant is terminal for a run: nothing is retried and the data
/// file is only written once traversal has succeeded.
#[derive(Debug, Error)]
pub enum TimingUpdateError {
    /// The data file could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        /// Data file path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The data file is not valid JSON
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        /// Data file path
        path: PathBuf,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// The document does not have the expected top-level shape
    #[error("invalid backend document: {0}")]
    InvalidDocument(String),

    /// A backend detail is not a JSON object
    #[error("backend detail {index} of entry {entry} is not an object")]
    InvalidDetail {
        /// Index of the backend entry
        entry: usize,
        /// Index of the detail within the entry
        index: usize,
    },

    /// The document could not be serialized
    #[error("failed to serialize backend document: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The data file could not be written
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        /// Data file path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Result type for timing update operations.
pub type Result<T> = std::result::Result<T, TimingUpdateError>;
