//! Classification output model
//!
//! Status labels, severities and the per-metric result record returned to
//! callers. Results are transient and never retained by the engine.

use serde::{Deserialize, Serialize};

use super::Metric;
use crate::reference::Range;

/// Categorical status for a single metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Deficient,
    Low,
    Normal,
    Warning,
    High,
    Excess,
    /// No reference band exists for the request
    Unavailable,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Deficient => "deficient",
            Status::Low => "low",
            Status::Normal => "normal",
            Status::Warning => "warning",
            Status::High => "high",
            Status::Excess => "excess",
            Status::Unavailable => "unavailable",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "deficient" => Some(Status::Deficient),
            "low" => Some(Status::Low),
            "normal" => Some(Status::Normal),
            "warning" => Some(Status::Warning),
            "high" => Some(Status::High),
            "excess" => Some(Status::Excess),
            "unavailable" => Some(Status::Unavailable),
            _ => None,
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregate status, ordered by severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallStatus {
    Normal,
    Warning,
    Danger,
}

impl OverallStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OverallStatus::Normal => "normal",
            OverallStatus::Warning => "warning",
            OverallStatus::Danger => "danger",
        }
    }
}

impl std::fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of classifying one measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub metric: Metric,
    pub value: f64,
    /// Normal range the value was judged against; `None` when no band matched
    pub band: Option<Range>,
    pub status: Status,
    pub percentile: Option<u8>,
}

impl ClassificationResult {
    /// Result for a metric with no usable reference
    pub fn unavailable(metric: Metric, value: f64) -> Self {
        Self {
            metric,
            value,
            band: None,
            status: Status::Unavailable,
            percentile: None,
        }
    }

    pub fn with_percentile(mut self, percentile: u8) -> Self {
        self.percentile = Some(percentile);
        self
    }
}
