// Copyright 2025 TN Timing Contributors
// SPDX-License-Identifier: Apache-2.0

//! The timing annotator: load, annotate, save.
//!
//! # Example
//!
//! ```no_run
//! use tn_timing_core::TimingAnnotator;
//!
//! let report = TimingAnnotator::new().run()?;
//! print!("{report}");
//! # Ok::<(), tn_timing_core::TimingUpdateError>(())
//! ```

use crate::document::{annotate_document_with, BACKEND_KEY};
use crate::error::Result;
use crate::io::{self, DEFAULT_DATA_PATH};
use crate::report::{AnnotationReport, DetailOutcome};
use crate::summary::PerformanceSummary;
use crate::timing::TimingTable;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Configuration for a [`TimingAnnotator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatorConfig {
    /// Document that is read and then overwritten.
    pub data_path: PathBuf,
}

impl Default for AnnotatorConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
        }
    }
}

/// Annotates the backend document with the built-in timing table.
#[derive(Debug, Clone, Default)]
pub struct TimingAnnotator {
    config: AnnotatorConfig,
}

impl TimingAnnotator {
    /// Create an annotator for the default data path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an annotator from an explicit configuration.
    pub fn with_config(config: AnnotatorConfig) -> Self {
        Self { config }
    }

    /// Point the annotator at a different document.
    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_path = path.into();
        self
    }

    /// Get the data path.
    pub fn data_path(&self) -> &Path {
        &self.config.data_path
    }

    /// Get the timing table in use.
    pub fn table(&self) -> &'static TimingTable {
        TimingTable::builtin()
    }

    /// Load the document from the data path.
    pub fn load(&self) -> Result<Value> {
        io::read_document(&self.config.data_path)
    }

    /// Annotate in place, calling `on_outcome` as each detail is decided.
    pub fn annotate_with<F>(&self, document: &mut Value, on_outcome: F) -> Result<AnnotationReport>
    where
        F: FnMut(&DetailOutcome),
    {
        let report = annotate_document_with(document, self.table(), on_outcome)?;
        log_entry_summaries(document);
        Ok(report)
    }

    /// Write the document back to the data path.
    pub fn save(&self, document: &Value) -> Result<()> {
        io::write_document(&self.config.data_path, document)
    }

    /// Load, annotate and save in one pass.
    ///
    /// Nothing is written unless loading and annotation both succeed.
    pub fn run(&self) -> Result<AnnotationReport> {
        self.run_with(|_| {})
    }

    /// Like [`run`](Self::run), calling `on_outcome` for each detail before
    /// the document is saved.
    pub fn run_with<F>(&self, on_outcome: F) -> Result<AnnotationReport>
    where
        F: FnMut(&DetailOutcome),
    {
        let mut document = self.load()?;
        let report = self.annotate_with(&mut document, on_outcome)?;
        self.save(&document)?;

        info!(
            path = %self.data_path().display(),
            processed = report.total_processed,
            updated = report.total_updated,
            services_found = report.services_found.len(),
            services_not_found = ?report.services_not_found,
            "Timing update complete"
        );

        Ok(report)
    }
}

fn log_entry_summaries(document: &Value) {
    let Some(entries) = document.get(BACKEND_KEY).and_then(Value::as_array) else {
        return;
    };

    for (index, entry) in entries.iter().enumerate() {
        if let Some(summary) = PerformanceSummary::from_entry(entry) {
            debug!(
                entry = index,
                tn = ?summary.tn,
                services = summary.service_count,
                average_ms = summary.average_time,
                total_ms = summary.total_time,
                max_time = summary.max_time,
                min_time = ?summary.min_time,
                "Entry performance summary"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_data_path() {
        let annotator = TimingAnnotator::new();
        assert_eq!(annotator.data_path(), Path::new("src/utils/TN_DATA.json"));
    }

    #[test]
    fn test_with_data_path() {
        let annotator = TimingAnnotator::new().with_data_path("/tmp/other.json");
        assert_eq!(annotator.data_path(), Path::new("/tmp/other.json"));

        let annotator = TimingAnnotator::with_config(AnnotatorConfig {
            data_path: PathBuf::from("a.json"),
        });
        assert_eq!(annotator.data_path(), Path::new("a.json"));
    }

    #[test]
    fn test_run_with_reports_outcomes_before_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("TN_DATA.json");
        let content = r#"{"backend": [{"backendDetail": [{"SERVICE_NAME": "Close Session"}, "bad"]}]}"#;
        std::fs::write(&path, content).unwrap();
        let mut seen = Vec::new();

        let result = TimingAnnotator::new()
            .with_data_path(&path)
            .run_with(|outcome| seen.push(outcome.display_name().to_string()));

        assert!(result.is_err());
        assert_eq!(seen, vec!["Close Session"]);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), content);
    }

    #[test]
    fn test_uses_builtin_table() {
        assert_eq!(TimingAnnotator::new().table().len(), 17);
    }
}
