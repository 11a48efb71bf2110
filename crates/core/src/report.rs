//! Annotation run reports.
//!
//! This module provides the per-detail outcomes and the accumulated report
//! of a single annotation run, plus its console rendering.

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Rendering used for a detail that has no usable `SERVICE_NAME`.
pub const MISSING_SERVICE_NAME: &str = "None";

/// What happened to a single backend detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DetailOutcome {
    /// Timing metrics were merged into the detail.
    Annotated {
        /// Matched service name.
        service_name: String,
    },
    /// The detail's service is not in the timing table.
    Unmatched {
        /// Service name as found, `None` when absent or null.
        service_name: Option<String>,
    },
}

impl DetailOutcome {
    /// Service name as shown on the console.
    pub fn display_name(&self) -> &str {
        match self {
            Self::Annotated { service_name } => service_name,
            Self::Unmatched { service_name } => {
                service_name.as_deref().unwrap_or(MISSING_SERVICE_NAME)
            }
        }
    }
}

impl fmt::Display for DetailOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Annotated { .. } => write!(f, "Added timing data for: {}", self.display_name()),
            Self::Unmatched { .. } => {
                write!(f, "No timing data found for: {}", self.display_name())
            }
        }
    }
}

/// Accumulated result of one annotation run.
///
/// Counters live here rather than in any shared state; a fresh report is
/// built for every run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnnotationReport {
    /// Backend details visited.
    pub total_processed: usize,
    /// Backend details that received timing metrics.
    pub total_updated: usize,
    /// Distinct matched service names, sorted.
    pub services_found: BTreeSet<String>,
    /// Distinct unmatched service names, sorted. Missing names are not listed.
    pub services_not_found: BTreeSet<String>,
    /// Per-detail outcomes in document order.
    pub outcomes: Vec<DetailOutcome>,
}

impl AnnotationReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a detail that received timing metrics.
    pub fn record_annotated(&mut self, service_name: impl Into<String>) -> &DetailOutcome {
        let service_name = service_name.into();
        self.total_processed += 1;
        self.total_updated += 1;
        self.services_found.insert(service_name.clone());
        self.push(DetailOutcome::Annotated { service_name })
    }

    /// Record a detail whose service has no timing metrics.
    pub fn record_unmatched(&mut self, service_name: Option<String>) -> &DetailOutcome {
        self.total_processed += 1;
        if let Some(name) = &service_name {
            self.services_not_found.insert(name.clone());
        }
        self.push(DetailOutcome::Unmatched { service_name })
    }

    fn push(&mut self, outcome: DetailOutcome) -> &DetailOutcome {
        let index = self.outcomes.len();
        self.outcomes.push(outcome);
        &self.outcomes[index]
    }

    /// Matched service names in sorted order.
    pub fn updated_services(&self) -> Vec<&str> {
        self.services_found.iter().map(String::as_str).collect()
    }

    /// Summary line with the update count.
    pub fn summary_line(&self) -> String {
        format!(
            "Successfully updated {} backend details with timing metrics",
            self.total_updated
        )
    }

    /// Line listing the matched service names.
    pub fn services_line(&self) -> String {
        format!("Services updated: {:?}", self.updated_services())
    }
}

/// Full console transcript: one line per detail, a blank line, then the summary.
impl fmt::Display for AnnotationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for outcome in &self.outcomes {
            writeln!(f, "{outcome}")?;
        }
        writeln!(f)?;
        writeln!(f, "{}", self.summary_line())?;
        writeln!(f, "{}", self.services_line())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report() {
        let report = AnnotationReport::new();
        assert_eq!(report.total_updated, 0);
        assert_eq!(
            report.to_string(),
            "\nSuccessfully updated 0 backend details with timing metrics\nServices updated: []\n"
        );
    }

    #[test]
    fn test_record_counts() {
        let mut report = AnnotationReport::new();
        report.record_annotated("Ticket Info");
        report.record_annotated("Ticket Info");
        report.record_unmatched(Some("Unknown Service".to_string()));
        report.record_unmatched(None);

        assert_eq!(report.total_processed, 4);
        assert_eq!(report.total_updated, 2);
        assert_eq!(report.updated_services(), vec!["Ticket Info"]);
        assert_eq!(report.services_not_found.len(), 1);
        assert_eq!(report.outcomes.len(), 4);
    }

    #[test]
    fn test_outcome_lines() {
        let added = DetailOutcome::Annotated {
            service_name: "Modem Reboot".to_string(),
        };
        let missing = DetailOutcome::Unmatched { service_name: None };

        assert_eq!(added.to_string(), "Added timing data for: Modem Reboot");
        assert_eq!(missing.to_string(), "No timing data found for: None");
    }

    #[test]
    fn test_services_line_is_sorted() {
        let mut report = AnnotationReport::new();
        report.record_annotated("Outage Info");
        report.record_annotated("AppointmentInfo");
        report.record_annotated("Modem Reboot");

        assert_eq!(
            report.services_line(),
            r#"Services updated: ["AppointmentInfo", "Modem Reboot", "Outage Info"]"#
        );
    }

    #[test]
    fn test_transcript_order() {
        let mut report = AnnotationReport::new();
        report.record_annotated("Modem Reboot");
        report.record_unmatched(Some("Unknown Service".to_string()));

        let transcript = report.to_string();
        let lines: Vec<&str> = transcript.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Added timing data for: Modem Reboot",
                "No timing data found for: Unknown Service",
                "",
                "Successfully updated 1 backend details with timing metrics",
                r#"Services updated: ["Modem Reboot"]"#,
            ]
        );
    }
}
