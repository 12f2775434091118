//! Reference dataset
//!
//! Bundles bands, growth tables and sport profiles into one immutable value.
//! A dataset is validated in full before anyone can use it.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::bands::{builtin_bands, AgeGroup, ReferenceBand, MAX_COVERED_AGE, MIN_COVERED_AGE};
use super::growth::{builtin_growth_table, GrowthMetric, GrowthTable, PercentileCutPoints};
use super::sports::{builtin_sports, normalize_sport_key, SportProfile, DEFAULT_SPORT_KEY};
use crate::models::Gender;

/// Version tag of the built-in dataset
pub const BUILTIN_VERSION: &str = "builtin-2024.1";

/// Reference data error types
#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("Failed to read reference file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid reference JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate or overlapping band {0}")]
    OverlappingBand(String),

    #[error("No band covers {0} for gender {1}")]
    MissingBand(String, Gender),

    #[error("Invalid band {band}: {reason}")]
    InvalidBand { band: String, reason: String },

    #[error("Growth cut-points decrease for {metric}/{gender}/{age}")]
    DecreasingCutPoints {
        metric: &'static str,
        gender: Gender,
        age: u32,
    },

    #[error("Duplicate growth entry {metric}/{gender}/{age}")]
    DuplicateGrowthEntry {
        metric: &'static str,
        gender: Gender,
        age: u32,
    },

    #[error("Invalid sport profile {key}: {reason}")]
    InvalidSport { key: String, reason: String },

    #[error("Default sport '{0}' is not in the sport table")]
    MissingDefaultSport(String),
}

/// Result type for reference data operations
pub type ReferenceResult<T> = Result<T, ReferenceError>;

fn default_sport_key() -> String {
    DEFAULT_SPORT_KEY.to_string()
}

/// Immutable reference tables shared by every evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceData {
    pub version: String,
    #[serde(default = "default_sport_key")]
    pub default_sport: String,
    pub bands: Vec<ReferenceBand>,
    pub growth: GrowthTable,
    pub sports: Vec<SportProfile>,
}

impl ReferenceData {
    /// The built-in dataset. Validated by the test suite.
    pub fn builtin() -> Self {
        Self {
            version: BUILTIN_VERSION.to_string(),
            default_sport: default_sport_key(),
            bands: builtin_bands(),
            growth: builtin_growth_table(),
            sports: builtin_sports(),
        }
    }

    /// Parse and validate a dataset from JSON text
    pub fn from_json_str(json: &str) -> ReferenceResult<Self> {
        let data: ReferenceData = serde_json::from_str(json)?;
        data.validated()
    }

    /// Read, parse and validate a dataset file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ReferenceResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    pub fn to_json_pretty(&self) -> ReferenceResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Replace the default sport, keeping validation guarantees
    pub fn with_default_sport(mut self, key: &str) -> ReferenceResult<Self> {
        self.default_sport = normalize_sport_key(key);
        self.validated()
    }

    /// Consume the dataset, returning it only if every invariant holds
    pub fn validated(mut self) -> ReferenceResult<Self> {
        self.default_sport = normalize_sport_key(&self.default_sport);
        for sport in &mut self.sports {
            sport.key = normalize_sport_key(&sport.key);
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> ReferenceResult<()> {
        self.validate_bands()?;
        self.validate_growth()?;
        self.validate_sports()
    }

    fn validate_bands(&self) -> ReferenceResult<()> {
        for (i, band) in self.bands.iter().enumerate() {
            let label = band.label();
            if band.age_group.min_age > band.age_group.max_age {
                return Err(invalid_band(&label, "age group is inverted"));
            }
            for other in &self.bands[i + 1..] {
                if other.gender == band.gender && other.age_group.overlaps(&band.age_group) {
                    return Err(ReferenceError::OverlappingBand(label));
                }
            }

            let bmi = band.anthropometry.bmi;
            if !bmi.normal.is_ordered() || !(bmi.underweight <= bmi.normal.lo) {
                return Err(invalid_band(&label, "BMI normal range is inconsistent"));
            }
            if !(bmi.normal.hi <= bmi.overweight && bmi.overweight < bmi.obese) {
                return Err(invalid_band(&label, "BMI thresholds are not ascending"));
            }

            let fat = band.anthropometry.body_fat;
            if !fat.normal.is_ordered() || !(fat.low <= fat.normal.lo && fat.normal.hi <= fat.high) {
                return Err(invalid_band(&label, "body fat thresholds are not ascending"));
            }

            for (analyte, range) in &band.biochemistry {
                if !range.is_ordered() {
                    return Err(invalid_band(
                        &label,
                        &format!("{} range is inverted", analyte.as_str()),
                    ));
                }
            }

            let d = band.dietary;
            for (name, range) in [
                ("calories_per_kg", d.calories_per_kg),
                ("protein_per_kg", d.protein_per_kg),
                ("carb_percent", d.carb_percent),
                ("fat_percent", d.fat_percent),
            ] {
                if !range.is_ordered() {
                    return Err(invalid_band(&label, &format!("{} range is inverted", name)));
                }
            }
        }

        // Every covered age resolves for both genders, with no gaps
        for age in MIN_COVERED_AGE..=MAX_COVERED_AGE {
            for gender in [Gender::Male, Gender::Female] {
                if self.band_for(age, gender).is_none() {
                    return Err(ReferenceError::MissingBand(format!("age {}", age), gender));
                }
            }
        }

        // Extra groups beyond the covered range still need both genders
        let groups: HashSet<AgeGroup> = self.bands.iter().map(|b| b.age_group).collect();
        for group in groups {
            for gender in [Gender::Male, Gender::Female] {
                if !self
                    .bands
                    .iter()
                    .any(|b| b.age_group == group && b.gender == gender)
                {
                    return Err(ReferenceError::MissingBand(
                        format!("age group {}", group.label()),
                        gender,
                    ));
                }
            }
        }

        Ok(())
    }

    fn validate_growth(&self) -> ReferenceResult<()> {
        let mut seen = HashSet::new();
        for entry in self.growth.entries() {
            if !seen.insert((entry.metric, entry.gender, entry.age)) {
                return Err(ReferenceError::DuplicateGrowthEntry {
                    metric: entry.metric.as_str(),
                    gender: entry.gender,
                    age: entry.age,
                });
            }
            if !entry.cut_points.is_non_decreasing() {
                return Err(ReferenceError::DecreasingCutPoints {
                    metric: entry.metric.as_str(),
                    gender: entry.gender,
                    age: entry.age,
                });
            }
        }
        Ok(())
    }

    fn validate_sports(&self) -> ReferenceResult<()> {
        let mut keys = HashSet::new();
        for sport in &self.sports {
            if !keys.insert(sport.key.as_str()) {
                return Err(invalid_sport(&sport.key, "duplicate key"));
            }
            if !(sport.calorie_multiplier > 1.0) || !sport.calorie_multiplier.is_finite() {
                return Err(invalid_sport(&sport.key, "calorie multiplier must exceed 1.0"));
            }
            if !sport.protein_per_kg.is_ordered() || sport.protein_per_kg.lo < 0.0 {
                return Err(invalid_sport(&sport.key, "protein range is invalid"));
            }
            if !sport.carbs_per_kg.is_ordered() || sport.carbs_per_kg.lo < 0.0 {
                return Err(invalid_sport(&sport.key, "carbohydrate range is invalid"));
            }
            if !(sport.hydration_ml_per_hour >= 0.0) {
                return Err(invalid_sport(&sport.key, "hydration volume is negative"));
            }
        }
        if !keys.contains(self.default_sport.as_str()) {
            return Err(ReferenceError::MissingDefaultSport(self.default_sport.clone()));
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Lookups
    // ------------------------------------------------------------------------

    /// The single band covering `age` for `gender`; `None` fails closed
    pub fn band_for(&self, age: u32, gender: Gender) -> Option<&ReferenceBand> {
        self.bands.iter().find(|b| b.matches(age, gender))
    }

    pub fn cut_points(&self, metric: GrowthMetric, gender: Gender, age: u32) -> Option<&PercentileCutPoints> {
        self.growth.lookup(metric, gender, age)
    }

    /// Exact sport lookup after key normalization
    pub fn sport(&self, key: &str) -> Option<&SportProfile> {
        let key = normalize_sport_key(key);
        self.sports.iter().find(|s| s.key == key)
    }

    /// Always `Some` on validated data
    pub fn default_sport_profile(&self) -> Option<&SportProfile> {
        self.sports.iter().find(|s| s.key == self.default_sport)
    }

    /// Age range covered by any band, if there are bands
    pub fn age_coverage(&self) -> Option<(u32, u32)> {
        let min = self.bands.iter().map(|b| b.age_group.min_age).min()?;
        let max = self.bands.iter().map(|b| b.age_group.max_age).max()?;
        Some((min, max))
    }
}

impl Default for ReferenceData {
    fn default() -> Self {
        Self::builtin()
    }
}

fn invalid_band(band: &str, reason: &str) -> ReferenceError {
    ReferenceError::InvalidBand {
        band: band.to_string(),
        reason: reason.to_string(),
    }
}

fn invalid_sport(key: &str, reason: &str) -> ReferenceError {
    ReferenceError::InvalidSport {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
