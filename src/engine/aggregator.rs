//! Nutritional status aggregation
//!
//! Folds per-metric results into one overall status. The severity table in
//! `severity_of` is the only place this policy is defined:
//!
//! | status                           | severity |
//! |----------------------------------|----------|
//! | normal                           | normal   |
//! | low, high, warning               | warning  |
//! | deficient, excess                | danger   |
//! | unavailable on a critical metric | danger   |
//! | unavailable on any other metric  | ignored  |
//!
//! Critical metrics are BMI, hemoglobin and glucose. The overall status is
//! the highest severity present; no results at all is `normal`.

use serde::Serialize;

use crate::models::{ClassificationResult, Metric, OverallStatus, Status};

/// Severity contributed by one result; `None` means it is ignored
pub fn severity_of(metric: Metric, status: Status) -> Option<OverallStatus> {
    match status {
        Status::Normal => Some(OverallStatus::Normal),
        Status::Low | Status::High | Status::Warning => Some(OverallStatus::Warning),
        Status::Deficient | Status::Excess => Some(OverallStatus::Danger),
        Status::Unavailable if metric.is_critical() => Some(OverallStatus::Danger),
        Status::Unavailable => None,
    }
}

/// Overall status for a set of results
pub fn aggregate(results: &[ClassificationResult]) -> OverallStatus {
    results
        .iter()
        .filter_map(|r| severity_of(r.metric, r.status))
        .max()
        .unwrap_or(OverallStatus::Normal)
}

/// Aggregate with the counts and metrics behind it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateReport {
    pub overall: OverallStatus,
    pub normal: usize,
    pub warning: usize,
    pub danger: usize,
    pub ignored: usize,
    /// Metrics at the overall severity, when it is above normal
    pub drivers: Vec<Metric>,
}

pub fn aggregate_report(results: &[ClassificationResult]) -> AggregateReport {
    let overall = aggregate(results);
    let mut report = AggregateReport {
        overall,
        normal: 0,
        warning: 0,
        danger: 0,
        ignored: 0,
        drivers: Vec::new(),
    };

    for result in results {
        let severity = severity_of(result.metric, result.status);
        match severity {
            Some(OverallStatus::Normal) => report.normal += 1,
            Some(OverallStatus::Warning) => report.warning += 1,
            Some(OverallStatus::Danger) => report.danger += 1,
            None => report.ignored += 1,
        }
        if overall != OverallStatus::Normal && severity == Some(overall) {
            report.drivers.push(result.metric);
        }
    }

    report
}
