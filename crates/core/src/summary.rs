// Copyright 2025 TN Timing Contributors
// SPDX-License-Identifier: Apache-2.0

//! Per-entry performance summaries.
//!
//! After annotation each backend entry can be summarized from the timing
//! fields of its details: how many services carry metrics, their combined
//! and mean average time, and the overall max and min.

use crate::document::{BACKEND_DETAIL_KEY, SERVICE_NAME_KEY};
use crate::timing::{AVERAGE_ELAPSED_TIME_KEY, MAX_TIME_KEY, MIN_TIME_KEY};
use serde::Serialize;
use serde_json::{Map, Value};

/// Timing figures for one annotated service within an entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceTiming {
    /// Service name, if the detail has one.
    pub name: Option<String>,
    /// Average elapsed time in milliseconds.
    pub avg_time: f64,
    /// Maximum time, if present.
    pub max_time: Option<f64>,
    /// Minimum time, if present.
    pub min_time: Option<f64>,
    /// The detail's measured `TIME_TAKEN`, if present.
    pub actual_time: Option<Value>,
    /// The detail's `STATUS`, if present.
    pub status: Option<Value>,
}

/// Performance summary for a single backend entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceSummary {
    /// The entry's `tn` identifier, if present.
    pub tn: Option<Value>,
    /// Number of details with a non-zero average time.
    pub service_count: usize,
    /// Mean of the averages.
    pub average_time: f64,
    /// Sum of the averages.
    pub total_time: f64,
    /// Largest `MAX_TIME`; details without one count as 0.
    pub max_time: f64,
    /// Smallest `MIN_TIME` among details that have one.
    pub min_time: Option<f64>,
    /// Per-service breakdown in document order.
    pub services: Vec<ServiceTiming>,
}

impl PerformanceSummary {
    /// Summarize a backend entry.
    ///
    /// Returns `None` when the entry has no detail list or none of its
    /// details carry a non-zero average time.
    pub fn from_entry(entry: &Value) -> Option<Self> {
        let details = entry.get(BACKEND_DETAIL_KEY)?.as_array()?;

        let services: Vec<ServiceTiming> = details
            .iter()
            .filter_map(Value::as_object)
            .filter_map(ServiceTiming::from_detail)
            .collect();

        if services.is_empty() {
            return None;
        }

        let total_time: f64 = services.iter().map(|s| s.avg_time).sum();
        let max_time = services
            .iter()
            .map(|s| s.max_time.unwrap_or(0.0))
            .fold(f64::MIN, f64::max);
        let min_time = services
            .iter()
            .filter_map(|s| s.min_time)
            .reduce(f64::min);

        Some(Self {
            tn: entry.get("tn").cloned(),
            service_count: services.len(),
            average_time: total_time / services.len() as f64,
            total_time,
            max_time,
            min_time,
            services,
        })
    }
}

impl ServiceTiming {
    fn from_detail(detail: &Map<String, Value>) -> Option<Self> {
        let avg_time = detail
            .get(AVERAGE_ELAPSED_TIME_KEY)
            .and_then(Value::as_f64)
            .filter(|avg| *avg != 0.0)?;

        Some(Self {
            name: detail
                .get(SERVICE_NAME_KEY)
                .and_then(Value::as_str)
                .map(str::to_string),
            avg_time,
            max_time: detail.get(MAX_TIME_KEY).and_then(Value::as_f64),
            min_time: detail.get(MIN_TIME_KEY).and_then(Value::as_f64),
            actual_time: detail.get("TIME_TAKEN").cloned(),
            status: detail.get("STATUS").cloned(),
        })
    }
}
