//! Athlete assessment
//!
//! Runs the whole ABCD pipeline for one athlete record against one
//! reference snapshot and returns plain data for the caller to render or
//! persist.

use serde::Serialize;

use super::aggregator::{aggregate, aggregate_report, AggregateReport};
use super::classifier::{classify, classify_intake};
use super::percentile::estimate_percentile;
use super::sport::{derive_targets, SportTargets};
use crate::models::{Athlete, ClassificationResult, Gender, Metric, MetricFamily, OverallStatus};
use crate::reference::{GrowthMetric, ReferenceData};

/// Estimated growth percentile for height or weight
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthPercentile {
    pub metric: GrowthMetric,
    pub value: f64,
    pub percentile: u8,
}

/// Status per ABCD domain
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DomainStatus {
    pub anthropometric: OverallStatus,
    pub biochemical: OverallStatus,
    pub dietary: OverallStatus,
}

/// Full assessment of one athlete
#[derive(Debug, Clone, Serialize)]
pub struct AthleteAssessment {
    pub athlete_id: String,
    pub age: u32,
    pub gender: Gender,
    pub reference_version: String,
    /// Band label such as `"9-13/male"`; `None` when no band covers the athlete
    pub band: Option<String>,
    pub bmi: Option<f64>,
    pub anthropometric: Vec<ClassificationResult>,
    pub growth: Vec<GrowthPercentile>,
    pub biochemical: Vec<ClassificationResult>,
    pub dietary: Vec<ClassificationResult>,
    pub domains: DomainStatus,
    pub overall: OverallStatus,
    pub summary: AggregateReport,
    pub targets: Option<SportTargets>,
    pub clinical_notes: Option<String>,
}

/// Assess an athlete against `data`
pub fn assess(athlete: &Athlete, data: &ReferenceData) -> AthleteAssessment {
    let band = data.band_for(athlete.age, athlete.gender);
    let body = &athlete.anthropometry;

    // Anthropometry
    let bmi = body.bmi();
    let mut anthropometric = vec![match bmi {
        Some(value) => classify(value, band, Metric::Bmi),
        None => ClassificationResult::unavailable(Metric::Bmi, 0.0),
    }];
    if let Some(fat) = body.body_fat_percent {
        anthropometric.push(classify(fat, band, Metric::BodyFat));
    }

    let growth = [
        (GrowthMetric::Height, body.height_cm),
        (GrowthMetric::Weight, body.weight_kg),
    ]
    .into_iter()
    .filter(|(_, value)| *value > 0.0)
    .map(|(metric, value)| GrowthPercentile {
        metric,
        value,
        percentile: estimate_percentile(data, value, athlete.age, athlete.gender, metric),
    })
    .collect();

    // Biochemistry; entries that are not lab analytes are ignored
    let biochemical: Vec<ClassificationResult> = athlete
        .biochemistry
        .iter()
        .filter(|m| m.metric.family() == MetricFamily::Biochemical)
        .map(|m| classify(m.value, band, m.metric))
        .collect();

    // Dietetics
    let dietary = athlete
        .dietary_intake
        .as_ref()
        .map(|intake| classify_intake(intake, body.weight_kg, band))
        .unwrap_or_default();

    let targets = athlete
        .base_calories
        .map(|base| derive_targets(data, body.weight_kg, base, &athlete.sport));

    let domains = DomainStatus {
        anthropometric: aggregate(&anthropometric),
        biochemical: aggregate(&biochemical),
        dietary: aggregate(&dietary),
    };

    let all: Vec<ClassificationResult> = anthropometric
        .iter()
        .chain(&biochemical)
        .chain(&dietary)
        .cloned()
        .collect();
    let summary = aggregate_report(&all);
    let band_label = band.map(|b| b.label());

    tracing::debug!(
        athlete = %athlete.id,
        band = band_label.as_deref().unwrap_or("none"),
        overall = %summary.overall,
        "Athlete assessed"
    );

    AthleteAssessment {
        athlete_id: athlete.id.clone(),
        age: athlete.age,
        gender: athlete.gender,
        reference_version: data.version.clone(),
        band: band_label,
        bmi,
        anthropometric,
        growth,
        biochemical,
        dietary,
        domains,
        overall: summary.overall,
        summary,
        targets,
        clinical_notes: athlete.clinical_notes.clone(),
    }
}
