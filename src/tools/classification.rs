//! Classification MCP Tools
//!
//! Single-metric classification, growth percentiles and status aggregation.

use serde::Serialize;

use crate::engine::{aggregate_report, classify, estimate_percentile, AggregateReport};
use crate::models::{ClassificationResult, Gender, Metric, Status};
use crate::reference::{GrowthMetric, ReferenceData};

pub fn parse_gender(gender: &str) -> Result<Gender, String> {
    Gender::from_str(gender).ok_or_else(|| format!("Unknown gender '{}'. Use male or female.", gender))
}

pub fn parse_metric(metric: &str) -> Result<Metric, String> {
    Metric::from_str(metric).ok_or_else(|| format!("Unknown metric '{}'", metric))
}

/// Response for classify_measurement
#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    #[serde(flatten)]
    pub result: ClassificationResult,
    pub metric_name: &'static str,
    pub unit: &'static str,
    pub age: u32,
    pub gender: Gender,
    pub reference_version: String,
}

/// Classify one measurement. Height and weight carry a percentile instead
/// of a band status.
pub fn classify_measurement(
    data: &ReferenceData,
    metric: &str,
    value: f64,
    age: u32,
    gender: &str,
) -> Result<ClassifyResponse, String> {
    let metric = parse_metric(metric)?;
    let gender = parse_gender(gender)?;

    let mut result = classify(value, data.band_for(age, gender), metric);
    if let Some(growth) = GrowthMetric::from_metric(metric) {
        result = result.with_percentile(estimate_percentile(data, value, age, gender, growth));
    }

    Ok(ClassifyResponse {
        result,
        metric_name: metric.display_name(),
        unit: metric.unit(),
        age,
        gender,
        reference_version: data.version.clone(),
    })
}

/// Response for estimate_percentile
#[derive(Debug, Serialize)]
pub struct PercentileResponse {
    pub metric: GrowthMetric,
    pub value: f64,
    pub age: u32,
    pub gender: Gender,
    pub percentile: u8,
    /// False when the age has no growth table entry and 50 was returned
    pub table_entry_found: bool,
}

pub fn estimate_growth_percentile(
    data: &ReferenceData,
    metric: &str,
    value: f64,
    age: u32,
    gender: &str,
) -> Result<PercentileResponse, String> {
    let metric = GrowthMetric::from_str(metric)
        .ok_or_else(|| format!("Unknown growth metric '{}'. Use height or weight.", metric))?;
    let gender = parse_gender(gender)?;

    Ok(PercentileResponse {
        metric,
        value,
        age,
        gender,
        percentile: estimate_percentile(data, value, age, gender, metric),
        table_entry_found: data.cut_points(metric, gender, age).is_some(),
    })
}

/// Aggregate (metric, status) name pairs into an overall status
pub fn aggregate_status(entries: &[(String, String)]) -> Result<AggregateReport, String> {
    let results = entries
        .iter()
        .map(|(metric, status)| {
            let metric = parse_metric(metric)?;
            let status = Status::from_str(status)
                .ok_or_else(|| format!("Unknown status '{}'", status))?;
            Ok(ClassificationResult {
                metric,
                value: 0.0,
                band: None,
                status,
                percentile: None,
            })
        })
        .collect::<Result<Vec<_>, String>>()?;

    Ok(aggregate_report(&results))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OverallStatus;

    #[test]
    fn test_classify_bmi() {
        let data = ReferenceData::builtin();
        let r = classify_measurement(&data, "imc", 22.0, 12, "M").unwrap();
        assert_eq!(r.result.status, Status::Warning);
        assert_eq!(r.unit, "kg/m²");
        assert!(r.result.percentile.is_none());
    }

    #[test]
    fn test_classify_height_has_percentile() {
        let data = ReferenceData::builtin();
        let r = classify_measurement(&data, "talla", 162.0, 16, "female").unwrap();
        assert_eq!(r.result.status, Status::Unavailable);
        assert_eq!(r.result.percentile, Some(50));
    }

    #[test]
    fn test_classify_rejects_unknown_names() {
        let data = ReferenceData::builtin();
        assert!(classify_measurement(&data, "zinc", 1.0, 12, "male").is_err());
        assert!(classify_measurement(&data, "bmi", 20.0, 12, "x").is_err());
    }

    #[test]
    fn test_percentile_reports_missing_entry() {
        let data = ReferenceData::builtin();
        let r = estimate_growth_percentile(&data, "height", 150.0, 7, "male").unwrap();
        assert_eq!(r.percentile, 50);
        assert!(!r.table_entry_found);

        let r = estimate_growth_percentile(&data, "height", 162.0, 16, "female").unwrap();
        assert!(r.table_entry_found);
    }

    #[test]
    fn test_aggregate_status() {
        let entries = vec![
            ("bmi".to_string(), "normal".to_string()),
            ("hemoglobina".to_string(), "low".to_string()),
        ];
        let report = aggregate_status(&entries).unwrap();
        assert_eq!(report.overall, OverallStatus::Warning);

        let bad = vec![("bmi".to_string(), "fine".to_string())];
        assert!(aggregate_status(&bad).is_err());
    }
}
