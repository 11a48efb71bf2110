// Copyright 2025 TN Timing Contributors
// SPDX-License-Identifier: Apache-2.0

//! Backend service timing metrics.
//!
//! This module holds the fixed table of per-service latency figures that
//! gets merged into backend details, along with the serialization rules
//! for the three timing fields.
//!
//! # Example
//!
//! ```
//! use tn_timing_core::timing::TimingTable;
//!
//! let table = TimingTable::builtin();
//! let metrics = table.get("Modem Reboot").unwrap();
//! assert_eq!(metrics.max_time, 247);
//! ```

use crate::error::{Result, TimingUpdateError};
use once_cell::sync::Lazy;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Key holding the average elapsed time on a backend detail.
pub const AVERAGE_ELAPSED_TIME_KEY: &str = "Average_Elapsed_Time_ms";

/// Key holding the maximum time on a backend detail.
pub const MAX_TIME_KEY: &str = "MAX_TIME";

/// Key holding the minimum time on a backend detail.
pub const MIN_TIME_KEY: &str = "MIN_TIME";

/// Service name, average ms, max ms, min ms.
///
/// `Modem Reboot` and `Close Session` do not satisfy min <= avg <= max.
/// They are kept exactly as measured.
const BUILTIN_ROWS: &[(&str, f64, u64, u64)] = &[
    ("Health Check", 15080.61538, 25000, 10000),
    ("GetPollDslamInfo", 13573.8, 20000, 8000),
    ("AppointmentInfo", 10946.32692, 18000, 6000),
    ("AutopayCompletion", 7739.5, 12000, 4000),
    ("Self Help Info", 7276.481383, 11500, 3800),
    ("Wireless Credential Notification", 6782.5, 10500, 3500),
    ("Wireless Modem Info", 5916.418478, 9200, 3000),
    ("Product Info", 5786.835777, 9000, 2800),
    ("AuthorizePayment", 5420.824138, 8500, 2700),
    ("BMSpeedUpgrade", 5299.582524, 8200, 2600),
    ("BMDataSource", 5297.669903, 8200, 2600),
    ("Outage Info", 4591.359447, 7200, 2200),
    ("RxDataSource", 2941.331014, 4800, 1500),
    ("Ticket Info", 2929.415323, 4800, 1500),
    ("RxSessionLessOutageInfoByTN", 2820.689178, 4600, 1400),
    ("Modem Reboot", 247.0, 247, 1000),
    ("Close Session", 54.0, 50, 1000),
];

static BUILTIN: Lazy<TimingTable> = Lazy::new(|| {
    BUILTIN_ROWS
        .iter()
        .map(|&(name, avg, max, min)| (name, TimingMetrics::new(avg, max, min)))
        .collect()
});

/// Timing figures for a single backend service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimingMetrics {
    /// Average elapsed time in milliseconds
    #[serde(
        rename = "Average_Elapsed_Time_ms",
        serialize_with = "serialize_millis"
    )]
    pub average_elapsed_time_ms: f64,
    /// Maximum observed time
    #[serde(rename = "MAX_TIME")]
    pub max_time: u64,
    /// Minimum observed time
    #[serde(rename = "MIN_TIME")]
    pub min_time: u64,
}

impl TimingMetrics {
    /// Create a new set of timing metrics.
    pub fn new(average_elapsed_time_ms: f64, max_time: u64, min_time: u64) -> Self {
        Self {
            average_elapsed_time_ms,
            max_time,
            min_time,
        }
    }

    /// Whether the figures are ordered as min <= avg <= max.
    pub fn is_consistent(&self) -> bool {
        let min = self.min_time as f64;
        let max = self.max_time as f64;
        min <= max && min <= self.average_elapsed_time_ms && self.average_elapsed_time_ms <= max
    }

    /// The three timing fields as a JSON object, in output order.
    pub fn to_fields(&self) -> Result<Map<String, Value>> {
        match serde_json::to_value(self).map_err(TimingUpdateError::Serialize)? {
            Value::Object(fields) => Ok(fields),
            other => Err(TimingUpdateError::InvalidDocument(format!(
                "timing metrics serialized to {other}"
            ))),
        }
    }

    /// Set the three timing fields on a backend detail.
    ///
    /// Existing timing keys keep their position; new ones are appended.
    pub fn apply_to(&self, detail: &mut Map<String, Value>) -> Result<()> {
        for (key, value) in self.to_fields()? {
            detail.insert(key, value);
        }
        Ok(())
    }
}

/// Whole-valued averages are written as integers so `247` stays `247`.
fn serialize_millis<S>(value: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;

    if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_EXACT {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

/// Immutable mapping from service name to timing metrics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimingTable {
    entries: BTreeMap<String, TimingMetrics>,
}

impl TimingTable {
    /// The built-in table, constructed once per process.
    pub fn builtin() -> &'static TimingTable {
        &BUILTIN
    }

    /// Look up the metrics for a service.
    pub fn get(&self, service_name: &str) -> Option<&TimingMetrics> {
        self.entries.get(service_name)
    }

    /// Number of services in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate services in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TimingMetrics)> {
        self.entries.iter().map(|(name, metrics)| (name.as_str(), metrics))
    }
}

impl<S: Into<String>> FromIterator<(S, TimingMetrics)> for TimingTable {
    fn from_iter<I: IntoIterator<Item = (S, TimingMetrics)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(name, metrics)| (name.into(), metrics))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builtin_table_size() {
        assert_eq!(TimingTable::builtin().len(), 17);
        assert!(!TimingTable::builtin().is_empty());
    }

    #[test]
    fn test_builtin_values_are_literal() {
        let table = TimingTable::builtin();

        let health = table.get("Health Check").unwrap();
        assert_eq!(health.average_elapsed_time_ms, 15080.61538);
        assert_eq!(health.max_time, 25000);
        assert_eq!(health.min_time, 10000);

        let close = table.get("Close Session").unwrap();
        assert_eq!(close.average_elapsed_time_ms, 54.0);
        assert_eq!(close.max_time, 50);
        assert_eq!(close.min_time, 1000);
    }

    #[test]
    fn test_lookup_is_exact() {
        let table = TimingTable::builtin();
        assert!(table.get("Outage Info").is_some());
        assert!(table.get("outage info").is_none());
        assert!(table.get("Outage Info ").is_none());
        assert!(table.get("Unknown Service").is_none());
    }

    #[test]
    fn test_consistency_check() {
        let table = TimingTable::builtin();
        let inconsistent: Vec<&str> = table
            .iter()
            .filter(|(_, metrics)| !metrics.is_consistent())
            .map(|(name, _)| name)
            .collect();
        assert_eq!(inconsistent, vec!["Close Session", "Modem Reboot"]);
    }

    #[test]
    fn test_whole_average_serializes_as_integer() {
        let fields = TimingMetrics::new(247.0, 247, 1000).to_fields().unwrap();
        assert_eq!(
            Value::Object(fields).to_string(),
            r#"{"Average_Elapsed_Time_ms":247,"MAX_TIME":247,"MIN_TIME":1000}"#
        );
    }

    #[test]
    fn test_fractional_average_serializes_as_float() {
        let fields = TimingMetrics::new(7739.5, 12000, 4000).to_fields().unwrap();
        assert_eq!(fields[AVERAGE_ELAPSED_TIME_KEY], json!(7739.5));
        assert_eq!(fields[MAX_TIME_KEY], json!(12000));
        assert_eq!(fields[MIN_TIME_KEY], json!(4000));
    }

    #[test]
    fn test_apply_overwrites_in_place() {
        let mut detail = match json!({
            "SERVICE_NAME": "Modem Reboot",
            "MAX_TIME": 1,
            "STATUS": "OK"
        }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };

        TimingMetrics::new(247.0, 247, 1000)
            .apply_to(&mut detail)
            .unwrap();

        let keys: Vec<&str> = detail.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec![
                "SERVICE_NAME",
                "MAX_TIME",
                "STATUS",
                "Average_Elapsed_Time_ms",
                "MIN_TIME"
            ]
        );
        assert_eq!(detail["MAX_TIME"], json!(247));
    }
}
