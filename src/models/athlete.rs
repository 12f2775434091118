//! Athlete model
//!
//! The athlete record supplied by the storage collaborator. The engine only
//! reads it; nothing here is persisted.

use serde::{Deserialize, Serialize};

use super::{Measurement, Nutrition};

/// Biological sex used to select reference bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" | "masculino" | "hombre" => Some(Gender::Male),
            "female" | "f" | "femenino" | "mujer" => Some(Gender::Female),
            _ => None,
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body measurements taken at assessment time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Anthropometry {
    pub weight_kg: f64,
    pub height_cm: f64,
    #[serde(default)]
    pub body_fat_percent: Option<f64>,
}

impl Anthropometry {
    /// Body mass index in kg/m². `None` when height is not positive.
    pub fn bmi(&self) -> Option<f64> {
        if !(self.height_cm > 0.0) || !self.weight_kg.is_finite() {
            return None;
        }
        let meters = self.height_cm / 100.0;
        Some(self.weight_kg / (meters * meters))
    }
}

/// An athlete as handed to the engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Athlete {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub age: u32,
    pub gender: Gender,
    pub sport: String,
    pub anthropometry: Anthropometry,
    #[serde(default)]
    pub biochemistry: Vec<Measurement>,
    /// Average daily intake from the dietary record
    #[serde(default)]
    pub dietary_intake: Option<Nutrition>,
    /// Base caloric need in kcal/day, computed outside the engine
    #[serde(default)]
    pub base_calories: Option<f64>,
    /// Clinical domain observations, carried through untouched
    #[serde(default)]
    pub clinical_notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_from_str() {
        assert_eq!(Gender::from_str("Male"), Some(Gender::Male));
        assert_eq!(Gender::from_str("F"), Some(Gender::Female));
        assert_eq!(Gender::from_str("femenino"), Some(Gender::Female));
        assert_eq!(Gender::from_str("other"), None);
    }

    #[test]
    fn test_bmi_from_anthropometry() {
        let a = Anthropometry {
            weight_kg: 45.0,
            height_cm: 150.0,
            body_fat_percent: None,
        };
        assert!((a.bmi().unwrap() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_bmi_without_height() {
        let a = Anthropometry {
            weight_kg: 45.0,
            height_cm: 0.0,
            body_fat_percent: None,
        };
        assert_eq!(a.bmi(), None);
    }

    #[test]
    fn test_athlete_deserialize_defaults() {
        let json = r#"{
            "id": "a-1",
            "age": 12,
            "gender": "male",
            "sport": "futbol",
            "anthropometry": {"weight_kg": 40.0, "height_cm": 150.0}
        }"#;
        let athlete: Athlete = serde_json::from_str(json).unwrap();
        assert_eq!(athlete.gender, Gender::Male);
        assert!(athlete.biochemistry.is_empty());
        assert!(athlete.dietary_intake.is_none());
        assert!(athlete.base_calories.is_none());
    }
}
