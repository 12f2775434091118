//! Band classifier
//!
//! Maps a measured value and its reference band to a status label. Every
//! function here is total: a missing band or range yields `unavailable`,
//! never an error, and never a neighbouring band.

use crate::models::{ClassificationResult, Metric, MetricFamily, Nutrition, Status};
use crate::reference::{BmiBand, BodyFatBand, Range, ReferenceBand};

/// Classify a BMI value.
///
/// Thresholds are checked in a fixed order and the first match wins:
/// deficient, normal, warning, excess. When `normal.hi == overweight` the
/// boundary value is therefore `normal`. Values falling in a gap between
/// thresholds go to the side they are on: below `normal.lo` is deficient,
/// anything else is warning.
pub fn classify_bmi(value: f64, band: &BmiBand) -> Status {
    if !value.is_finite() {
        return Status::Unavailable;
    }
    if value < band.underweight {
        Status::Deficient
    } else if band.normal.contains(value) {
        Status::Normal
    } else if value >= band.overweight && value < band.obese {
        Status::Warning
    } else if value >= band.obese {
        Status::Excess
    } else if value < band.normal.lo {
        Status::Deficient
    } else {
        Status::Warning
    }
}

/// Classify against a plain inclusive range
pub fn classify_range(value: f64, range: &Range) -> Status {
    if !value.is_finite() {
        Status::Unavailable
    } else if value < range.lo {
        Status::Low
    } else if value <= range.hi {
        Status::Normal
    } else {
        Status::High
    }
}

/// Classify body fat. Below `low` or below the normal range is low, above
/// the normal range is high.
pub fn classify_body_fat(value: f64, band: &BodyFatBand) -> Status {
    if value.is_finite() && value < band.low {
        return Status::Low;
    }
    classify_range(value, &band.normal)
}

/// The normal range a metric is judged against within a band
pub fn normal_range(band: &ReferenceBand, metric: Metric) -> Option<Range> {
    match metric {
        Metric::Bmi => Some(band.anthropometry.bmi.normal),
        Metric::BodyFat => Some(band.anthropometry.body_fat.normal),
        Metric::Analyte(analyte) => band.analyte_range(analyte),
        Metric::CaloriesPerKg => Some(band.dietary.calories_per_kg),
        Metric::ProteinPerKg => Some(band.dietary.protein_per_kg),
        Metric::CarbPercent => Some(band.dietary.carb_percent),
        Metric::FatPercent => Some(band.dietary.fat_percent),
        Metric::Height | Metric::Weight => None,
    }
}

/// Classify one value for `metric` against an optional band.
///
/// `band` is `None` when no band exists for the athlete's age and gender.
/// Growth metrics are not band-classified and come back `unavailable`.
pub fn classify(value: f64, band: Option<&ReferenceBand>, metric: Metric) -> ClassificationResult {
    let Some(band) = band else {
        return ClassificationResult::unavailable(metric, value);
    };
    let Some(range) = normal_range(band, metric) else {
        return ClassificationResult::unavailable(metric, value);
    };

    let status = match metric.family() {
        MetricFamily::Bmi => classify_bmi(value, &band.anthropometry.bmi),
        MetricFamily::BodyFat => classify_body_fat(value, &band.anthropometry.body_fat),
        MetricFamily::Biochemical | MetricFamily::Dietary => classify_range(value, &range),
        MetricFamily::Growth => Status::Unavailable,
    };

    ClassificationResult {
        metric,
        value,
        band: (status != Status::Unavailable).then_some(range),
        status,
        percentile: None,
    }
}

/// Dietary composite: energy and protein per kg, carbohydrate and fat
/// share of energy.
///
/// Without a band, or without a positive body weight for the per-kg
/// metrics, the affected entries are `unavailable`.
pub fn classify_intake(
    intake: &Nutrition,
    weight_kg: f64,
    band: Option<&ReferenceBand>,
) -> Vec<ClassificationResult> {
    let per_kg = |amount: f64| (weight_kg > 0.0).then(|| amount / weight_kg);

    let values = [
        (Metric::CaloriesPerKg, per_kg(intake.effective_energy_kcal())),
        (Metric::ProteinPerKg, per_kg(intake.protein_g)),
        (Metric::CarbPercent, intake.carb_percent()),
        (Metric::FatPercent, intake.fat_percent()),
    ];

    values
        .into_iter()
        .map(|(metric, value)| match value {
            Some(v) => classify(v, band, metric),
            None => ClassificationResult::unavailable(metric, 0.0),
        })
        .collect()
}
