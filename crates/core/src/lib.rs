//! Backend timing annotation for TN Timing.
//!
//! This crate merges a fixed table of per-service latency figures into the
//! backend details of a `TN_DATA.json` document.
//!
//! # Quick Start
//!
//! ```no_run
//! use tn_timing_core::TimingAnnotator;
//!
//! let report = TimingAnnotator::new().run()?;
//! println!("{} details updated", report.total_updated);
//! # Ok::<(), tn_timing_core::TimingUpdateError>(())
//! ```
//!
//! # Modules
//!
//! - [`timing`] - The timing table and `TimingMetrics`
//! - [`document`] - Traversal and merge over the backend document
//! - [`io`] - Reading and writing the document
//! - [`report`] - Per-run outcomes and console transcript
//! - [`summary`] - Per-entry performance summaries
//! - [`annotator`] - Load, annotate, save

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod annotator;
pub mod document;
pub mod error;
pub mod io;
pub mod report;
pub mod summary;
pub mod timing;

pub use annotator::{AnnotatorConfig, TimingAnnotator};
pub use document::{annotate_document, annotate_document_with};
pub use error::{Result, TimingUpdateError};
pub use report::{AnnotationReport, DetailOutcome};
pub use summary::PerformanceSummary;
pub use timing::{TimingMetrics, TimingTable};
