// Copyright 2025 TN Timing Contributors
// SPDX-License-Identifier: Apache-2.0

//! Backend document traversal.
//!
//! The document is handled as a [`serde_json::Value`] so that every field
//! the annotator does not own survives the round trip untouched:
//!
//! ```text
//! { "backend": [ { "backendDetail": [ { "SERVICE_NAME": ..., ... } ] } ] }
//! ```
//!
//! Entries without a `backendDetail` list are skipped; string and array
//! entries count as having none. A missing `backend` key is an empty
//! document.

use crate::error::{Result, TimingUpdateError};
use crate::report::{AnnotationReport, DetailOutcome};
use crate::timing::TimingTable;
use serde_json::Value;
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Top-level key holding the backend entries.
pub const BACKEND_KEY: &str = "backend";

/// Entry key holding the backend details.
pub const BACKEND_DETAIL_KEY: &str = "backendDetail";

/// Detail key identifying the backend service.
pub const SERVICE_NAME_KEY: &str = "SERVICE_NAME";

/// Merge timing metrics into every matching backend detail, in place.
///
/// Details are visited in document order. A detail whose `SERVICE_NAME` is
/// a key of `table` gets the three timing fields set (overwriting earlier
/// values); every other detail is left exactly as it was.
///
/// # Errors
///
/// Returns [`TimingUpdateError::InvalidDocument`] if the root is not an
/// object, `backend` is not an array or an entry is null, a boolean or a
/// number, and [`TimingUpdateError::InvalidDetail`] if a detail is not an
/// object. The document may be partially annotated when an error is
/// returned, so callers must not persist it.
pub fn annotate_document(document: &mut Value, table: &TimingTable) -> Result<AnnotationReport> {
    annotate_document_with(document, table, |_| {})
}

/// Like [`annotate_document`], calling `on_outcome` as each detail is decided.
///
/// Outcomes reported before an error are not rolled back.
pub fn annotate_document_with<F>(
    document: &mut Value,
    table: &TimingTable,
    mut on_outcome: F,
) -> Result<AnnotationReport>
where
    F: FnMut(&DetailOutcome),
{
    let mut report = AnnotationReport::new();

    let root = match document {
        Value::Object(root) => root,
        other => {
            return Err(TimingUpdateError::InvalidDocument(format!(
                "expected an object at the top level, found {}",
                value_kind(other)
            )))
        }
    };

    let entries = match root.get_mut(BACKEND_KEY) {
        None => {
            debug!("document has no backend entries");
            return Ok(report);
        }
        Some(Value::Array(entries)) => entries,
        Some(other) => {
            return Err(TimingUpdateError::InvalidDocument(format!(
                "`{}` must be an array, found {}",
                BACKEND_KEY,
                value_kind(other)
            )))
        }
    };

    let mut inconsistent_noted = BTreeSet::new();

    for (entry_index, entry) in entries.iter_mut().enumerate() {
        if matches!(entry, Value::Null | Value::Bool(_) | Value::Number(_)) {
            return Err(TimingUpdateError::InvalidDocument(format!(
                "backend entry {} is {}",
                entry_index,
                value_kind(entry)
            )));
        }

        let Some(details) = entry
            .get_mut(BACKEND_DETAIL_KEY)
            .and_then(Value::as_array_mut)
        else {
            debug!(entry = entry_index, "skipping backend entry without detail list");
            continue;
        };

        for (index, detail) in details.iter_mut().enumerate() {
            let detail = detail
                .as_object_mut()
                .ok_or(TimingUpdateError::InvalidDetail {
                    entry: entry_index,
                    index,
                })?;

            let (service_name, metrics) = match detail.get(SERVICE_NAME_KEY) {
                Some(Value::String(name)) => (Some(name.clone()), table.get(name).copied()),
                None | Some(Value::Null) => (None, None),
                Some(other) => (Some(other.to_string()), None),
            };

            match (service_name, metrics) {
                (Some(name), Some(metrics)) => {
                    metrics.apply_to(detail)?;

                    if !metrics.is_consistent() && inconsistent_noted.insert(name.clone()) {
                        info!(
                            service = %name,
                            average_ms = metrics.average_elapsed_time_ms,
                            max_time = metrics.max_time,
                            min_time = metrics.min_time,
                            "Timing row is not ordered min <= avg <= max, applied as-is"
                        );
                    }

                    debug!(entry = entry_index, detail = index, service = %name, "Added timing data");
                    on_outcome(report.record_annotated(name));
                }
                (name, _) => {
                    debug!(entry = entry_index, detail = index, service = ?name, "No timing data");
                    on_outcome(report.record_unmatched(name));
                }
            }
        }
    }

    Ok(report)
}

/// Short JSON type name for error messages.
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
