//! Sport-adjusted targets
//!
//! Scales an athlete's base caloric need and body weight by a sport
//! profile. Unknown sports fall back to the default profile.

use serde::Serialize;

use crate::reference::{normalize_sport_key, Range, ReferenceData, SportProfile};

/// Advisory daily targets for one athlete and sport
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SportTargets {
    /// Sport key the targets were computed with
    pub sport_key: String,
    pub sport_name: String,
    /// True when the requested sport was unknown and the default was used
    pub fallback: bool,
    pub calories: f64,
    pub protein_range_g: Range,
    pub carb_range_g: Range,
    pub hydration_ml_per_hour: f64,
    pub key_micronutrients: Vec<String>,
    pub supplements: Vec<String>,
}

/// Find the profile for `sport_key`, or the default profile.
///
/// Returns the profile and whether the fallback was taken.
pub fn resolve_sport<'a>(data: &'a ReferenceData, sport_key: &str) -> Option<(&'a SportProfile, bool)> {
    if let Some(profile) = data.sport(sport_key) {
        return Some((profile, false));
    }
    tracing::debug!(
        requested = %normalize_sport_key(sport_key),
        default = %data.default_sport,
        "Unknown sport, using default profile"
    );
    data.default_sport_profile().map(|profile| (profile, true))
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Derive calorie, macronutrient and hydration targets.
///
/// `base_calories` is the athlete's base caloric need (kcal/day) from an
/// external estimate. Negative or non-finite inputs count as zero, so the
/// gram ranges are always non-negative with `lo <= hi`.
pub fn derive_targets(
    data: &ReferenceData,
    weight_kg: f64,
    base_calories: f64,
    sport_key: &str,
) -> SportTargets {
    let weight_kg = non_negative(weight_kg);
    let base_calories = non_negative(base_calories);

    let Some((profile, fallback)) = resolve_sport(data, sport_key) else {
        // Only reachable with unvalidated data lacking every profile
        tracing::warn!(sport = sport_key, "No sport profiles available");
        return SportTargets {
            sport_key: normalize_sport_key(sport_key),
            sport_name: String::new(),
            fallback: true,
            calories: base_calories,
            protein_range_g: Range::new(0.0, 0.0),
            carb_range_g: Range::new(0.0, 0.0),
            hydration_ml_per_hour: 0.0,
            key_micronutrients: Vec::new(),
            supplements: Vec::new(),
        };
    };

    SportTargets {
        sport_key: profile.key.clone(),
        sport_name: profile.name.clone(),
        fallback,
        calories: base_calories * profile.calorie_multiplier,
        protein_range_g: profile.protein_per_kg.scale(weight_kg),
        carb_range_g: profile.carbs_per_kg.scale(weight_kg),
        hydration_ml_per_hour: profile.hydration_ml_per_hour,
        key_micronutrients: profile.key_micronutrients.clone(),
        supplements: profile.supplements.clone(),
    }
}
