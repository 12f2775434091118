//! Assessment MCP Tools
//!
//! Full athlete assessment and sport-adjusted targets.

use std::collections::HashMap;

use crate::engine::{assess, derive_targets, AthleteAssessment, SportTargets};
use crate::models::{Analyte, Anthropometry, Athlete, Measurement, Metric, Nutrition};
use crate::reference::ReferenceData;

use super::classification::parse_gender;

/// Flat athlete record as received from a tool call
#[derive(Debug, Clone, Default)]
pub struct AthleteInput {
    pub id: String,
    pub name: Option<String>,
    pub age: u32,
    pub gender: String,
    pub sport: Option<String>,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub body_fat_percent: Option<f64>,
    /// Analyte name to value, e.g. `{"hemoglobina": 13.2}`
    pub biochemistry: HashMap<String, f64>,
    pub intake: Option<Nutrition>,
    pub base_calories: Option<f64>,
    pub clinical_notes: Option<String>,
}

/// Analyte readings from a name-to-value map, in a stable order
pub fn parse_biochemistry(values: &HashMap<String, f64>) -> Result<Vec<Measurement>, String> {
    let mut measurements = values
        .iter()
        .map(|(name, value)| {
            Analyte::from_str(name)
                .map(|a| Measurement::new(Metric::Analyte(a), *value))
                .ok_or_else(|| format!("Unknown analyte '{}'", name))
        })
        .collect::<Result<Vec<_>, String>>()?;
    measurements.sort_by_key(|m| m.metric.as_str());
    Ok(measurements)
}

impl AthleteInput {
    pub fn into_athlete(self, data: &ReferenceData) -> Result<Athlete, String> {
        Ok(Athlete {
            gender: parse_gender(&self.gender)?,
            biochemistry: parse_biochemistry(&self.biochemistry)?,
            id: self.id,
            name: self.name,
            age: self.age,
            sport: self.sport.unwrap_or_else(|| data.default_sport.clone()),
            anthropometry: Anthropometry {
                weight_kg: self.weight_kg,
                height_cm: self.height_cm,
                body_fat_percent: self.body_fat_percent,
            },
            dietary_intake: self.intake,
            base_calories: self.base_calories,
            clinical_notes: self.clinical_notes,
        })
    }
}

pub fn assess_athlete(data: &ReferenceData, input: AthleteInput) -> Result<AthleteAssessment, String> {
    let athlete = input.into_athlete(data)?;
    Ok(assess(&athlete, data))
}

pub fn derive_sport_targets(
    data: &ReferenceData,
    weight_kg: f64,
    base_calories: f64,
    sport: Option<&str>,
) -> SportTargets {
    let sport = sport.unwrap_or(&data.default_sport);
    derive_targets(data, weight_kg, base_calories, sport)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OverallStatus, Status};

    fn input() -> AthleteInput {
        AthleteInput {
            id: "ath-1".to_string(),
            age: 15,
            gender: "femenino".to_string(),
            sport: Some("Natación".to_string()),
            weight_kg: 55.0,
            height_cm: 162.0,
            biochemistry: HashMap::from([
                ("hemoglobina".to_string(), 13.0),
                ("ferritina".to_string(), 8.0),
            ]),
            base_calories: Some(2000.0),
            ..AthleteInput::default()
        }
    }

    #[test]
    fn test_assess_from_flat_input() {
        let data = ReferenceData::builtin();
        let result = assess_athlete(&data, input()).unwrap();
        assert_eq!(result.band.as_deref(), Some("14-18/female"));

        let ferritin = result
            .biochemical
            .iter()
            .find(|r| r.metric == Metric::Analyte(Analyte::Ferritin))
            .unwrap();
        assert_eq!(ferritin.status, Status::Low);
        assert_eq!(result.overall, OverallStatus::Warning);
        assert_eq!(result.targets.unwrap().sport_key, "natacion");
    }

    #[test]
    fn test_unknown_analyte_rejected() {
        let data = ReferenceData::builtin();
        let mut bad = input();
        bad.biochemistry.insert("zinc".to_string(), 80.0);
        assert!(assess_athlete(&data, bad).is_err());
    }

    #[test]
    fn test_missing_sport_uses_default() {
        let data = ReferenceData::builtin();
        let mut no_sport = input();
        no_sport.sport = None;
        let athlete = no_sport.into_athlete(&data).unwrap();
        assert_eq!(athlete.sport, "futbol");

        let targets = derive_sport_targets(&data, 50.0, 2000.0, None);
        assert_eq!(targets.sport_key, "futbol");
        assert!(!targets.fallback);
    }
}
