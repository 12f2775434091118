//! Metric model
//!
//! Identifies what a measurement measures, which reference family
//! classifies it, and the unit its value is implied to be in.

use serde::{Deserialize, Serialize};

/// Blood analytes with reference ranges
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Analyte {
    Hemoglobin,
    Hematocrit,
    Iron,
    Ferritin,
    VitaminD,
    Glucose,
}

impl Analyte {
    pub const ALL: [Analyte; 6] = [
        Analyte::Hemoglobin,
        Analyte::Hematocrit,
        Analyte::Iron,
        Analyte::Ferritin,
        Analyte::VitaminD,
        Analyte::Glucose,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Analyte::Hemoglobin => "hemoglobin",
            Analyte::Hematocrit => "hematocrit",
            Analyte::Iron => "iron",
            Analyte::Ferritin => "ferritin",
            Analyte::VitaminD => "vitamin_d",
            Analyte::Glucose => "glucose",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "hemoglobin" | "hemoglobina" | "hb" | "hgb" => Some(Analyte::Hemoglobin),
            "hematocrit" | "hematocrito" | "hct" => Some(Analyte::Hematocrit),
            "iron" | "hierro" | "fe" => Some(Analyte::Iron),
            "ferritin" | "ferritina" => Some(Analyte::Ferritin),
            "vitamin_d" | "vitamind" | "vitamina_d" | "25_oh_d" => Some(Analyte::VitaminD),
            "glucose" | "glucosa" | "glucemia" => Some(Analyte::Glucose),
            _ => None,
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Analyte::Hemoglobin => "g/dL",
            Analyte::Hematocrit => "%",
            Analyte::Iron => "µg/dL",
            Analyte::Ferritin => "ng/mL",
            Analyte::VitaminD => "ng/mL",
            Analyte::Glucose => "mg/dL",
        }
    }
}

/// Which reference scheme classifies a metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricFamily {
    /// Four-way deficient/normal/warning/excess thresholds
    Bmi,
    /// low/normal/high against the body-fat band
    BodyFat,
    /// low/normal/high against an analyte range
    Biochemical,
    /// low/normal/high against a dietary range
    Dietary,
    /// Height and weight, handled by the percentile estimator
    Growth,
}

/// ABCD evaluation domain a metric belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Anthropometric,
    Biochemical,
    Dietary,
}

/// Measured quantity identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Bmi,
    BodyFat,
    Height,
    Weight,
    Analyte(Analyte),
    CaloriesPerKg,
    ProteinPerKg,
    CarbPercent,
    FatPercent,
}

impl Metric {
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Bmi => "bmi",
            Metric::BodyFat => "body_fat",
            Metric::Height => "height",
            Metric::Weight => "weight",
            Metric::Analyte(a) => a.as_str(),
            Metric::CaloriesPerKg => "calories_per_kg",
            Metric::ProteinPerKg => "protein_per_kg",
            Metric::CarbPercent => "carb_percent",
            Metric::FatPercent => "fat_percent",
        }
    }

    /// Parse a metric name; analyte names resolve to `Metric::Analyte`
    pub fn from_str(s: &str) -> Option<Self> {
        let key = s.trim().to_lowercase().replace(['-', ' '], "_");
        match key.as_str() {
            "bmi" | "imc" => Some(Metric::Bmi),
            "body_fat" | "bodyfat" | "grasa_corporal" | "body_fat_percent" => Some(Metric::BodyFat),
            "height" | "talla" | "estatura" => Some(Metric::Height),
            "weight" | "peso" => Some(Metric::Weight),
            "calories_per_kg" | "kcal_per_kg" => Some(Metric::CaloriesPerKg),
            "protein_per_kg" => Some(Metric::ProteinPerKg),
            "carb_percent" | "carbohydrate_percent" => Some(Metric::CarbPercent),
            "fat_percent" => Some(Metric::FatPercent),
            other => Analyte::from_str(other).map(Metric::Analyte),
        }
    }

    pub fn family(&self) -> MetricFamily {
        match self {
            Metric::Bmi => MetricFamily::Bmi,
            Metric::BodyFat => MetricFamily::BodyFat,
            Metric::Height | Metric::Weight => MetricFamily::Growth,
            Metric::Analyte(_) => MetricFamily::Biochemical,
            Metric::CaloriesPerKg
            | Metric::ProteinPerKg
            | Metric::CarbPercent
            | Metric::FatPercent => MetricFamily::Dietary,
        }
    }

    pub fn domain(&self) -> Domain {
        match self.family() {
            MetricFamily::Bmi | MetricFamily::BodyFat | MetricFamily::Growth => {
                Domain::Anthropometric
            }
            MetricFamily::Biochemical => Domain::Biochemical,
            MetricFamily::Dietary => Domain::Dietary,
        }
    }

    /// Metrics whose missing reference escalates the overall status
    pub fn is_critical(&self) -> bool {
        matches!(
            self,
            Metric::Bmi | Metric::Analyte(Analyte::Hemoglobin) | Metric::Analyte(Analyte::Glucose)
        )
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Metric::Bmi => "Body Mass Index",
            Metric::BodyFat => "Body Fat",
            Metric::Height => "Height",
            Metric::Weight => "Weight",
            Metric::Analyte(Analyte::Hemoglobin) => "Hemoglobin",
            Metric::Analyte(Analyte::Hematocrit) => "Hematocrit",
            Metric::Analyte(Analyte::Iron) => "Serum Iron",
            Metric::Analyte(Analyte::Ferritin) => "Ferritin",
            Metric::Analyte(Analyte::VitaminD) => "Vitamin D",
            Metric::Analyte(Analyte::Glucose) => "Fasting Glucose",
            Metric::CaloriesPerKg => "Energy per kg",
            Metric::ProteinPerKg => "Protein per kg",
            Metric::CarbPercent => "Carbohydrate share of energy",
            Metric::FatPercent => "Fat share of energy",
        }
    }

    /// Unit the value is implied to be in
    pub fn unit(&self) -> &'static str {
        match self {
            Metric::Bmi => "kg/m²",
            Metric::BodyFat => "%",
            Metric::Height => "cm",
            Metric::Weight => "kg",
            Metric::Analyte(a) => a.unit(),
            Metric::CaloriesPerKg => "kcal/kg",
            Metric::ProteinPerKg => "g/kg",
            Metric::CarbPercent | Metric::FatPercent => "% kcal",
        }
    }
}

/// A single observed value for one metric
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub metric: Metric,
    pub value: f64,
}

impl Measurement {
    pub fn new(metric: Metric, value: f64) -> Self {
        Self { metric, value }
    }
}
