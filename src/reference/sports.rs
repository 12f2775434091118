//! Sport profiles
//!
//! Energy multipliers, macronutrient ranges and hydration volumes per sport.

use serde::{Deserialize, Serialize};

use super::Range;
use crate::text::fold_key;

/// Sport used when a requested key is unknown
pub const DEFAULT_SPORT_KEY: &str = "futbol";

/// Sport-specific nutrition parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SportProfile {
    pub key: String,
    pub name: String,
    /// Applied to base caloric need; always above 1.0
    pub calorie_multiplier: f64,
    pub protein_per_kg: Range,
    pub carbs_per_kg: Range,
    pub hydration_ml_per_hour: f64,
    pub key_micronutrients: Vec<String>,
    pub supplements: Vec<String>,
}

/// Canonical form of a sport key: trimmed, lowercase, accents folded,
/// spaces and dashes as underscores
pub fn normalize_sport_key(key: &str) -> String {
    fold_key(key).replace([' ', '-'], "_")
}

#[allow(clippy::too_many_arguments)]
fn profile(
    key: &str,
    name: &str,
    calorie_multiplier: f64,
    protein_per_kg: (f64, f64),
    carbs_per_kg: (f64, f64),
    hydration_ml_per_hour: f64,
    key_micronutrients: &[&str],
    supplements: &[&str],
) -> SportProfile {
    SportProfile {
        key: key.to_string(),
        name: name.to_string(),
        calorie_multiplier,
        protein_per_kg: Range::new(protein_per_kg.0, protein_per_kg.1),
        carbs_per_kg: Range::new(carbs_per_kg.0, carbs_per_kg.1),
        hydration_ml_per_hour,
        key_micronutrients: key_micronutrients.iter().map(|s| s.to_string()).collect(),
        supplements: supplements.iter().map(|s| s.to_string()).collect(),
    }
}

/// The built-in sport profiles
pub fn builtin_sports() -> Vec<SportProfile> {
    vec![
        profile(
            "futbol",
            "Fútbol",
            1.6,
            (1.4, 1.7),
            (5.0, 7.0),
            600.0,
            &["hierro", "calcio", "vitamina D", "magnesio"],
            &["bebida isotónica", "creatina"],
        ),
        profile(
            "baloncesto",
            "Baloncesto",
            1.55,
            (1.4, 1.7),
            (5.0, 7.0),
            700.0,
            &["hierro", "calcio", "potasio"],
            &["bebida isotónica"],
        ),
        profile(
            "natacion",
            "Natación",
            1.7,
            (1.4, 1.8),
            (6.0, 8.0),
            500.0,
            &["hierro", "zinc", "vitamina D"],
            &["bebida isotónica", "vitamina D"],
        ),
        profile(
            "atletismo",
            "Atletismo",
            1.65,
            (1.3, 1.6),
            (6.0, 10.0),
            750.0,
            &["hierro", "calcio", "vitamina B12", "sodio"],
            &["bebida isotónica", "geles de carbohidrato", "hierro"],
        ),
        profile(
            "voleibol",
            "Voleibol",
            1.45,
            (1.3, 1.6),
            (4.0, 6.0),
            500.0,
            &["calcio", "vitamina D", "magnesio"],
            &["bebida isotónica"],
        ),
        profile(
            "tenis",
            "Tenis",
            1.5,
            (1.3, 1.6),
            (5.0, 7.0),
            800.0,
            &["sodio", "potasio", "magnesio"],
            &["bebida isotónica", "electrolitos"],
        ),
        profile(
            "gimnasia",
            "Gimnasia",
            1.4,
            (1.5, 1.8),
            (4.0, 6.0),
            400.0,
            &["calcio", "hierro", "vitamina D"],
            &["calcio", "vitamina D"],
        ),
        profile(
            "ciclismo",
            "Ciclismo",
            1.75,
            (1.3, 1.6),
            (7.0, 10.0),
            750.0,
            &["hierro", "sodio", "magnesio"],
            &["bebida isotónica", "geles de carbohidrato", "cafeína"],
        ),
    ]
}
