//! Shared nutrition data structure
//!
//! Used for food composition rows and an athlete's daily intake.

use serde::{Deserialize, Serialize};

/// Energy per gram of protein and of carbohydrate (Atwater)
pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
pub const KCAL_PER_G_CARBS: f64 = 4.0;
/// Energy per gram of fat (Atwater)
pub const KCAL_PER_G_FAT: f64 = 9.0;

/// Nutritional information
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    pub energy_kcal: f64,
    pub protein_g: f64,
    pub lipids_g: f64,
    pub carbs_g: f64,
    #[serde(default)]
    pub fiber_g: f64,
}

impl Nutrition {
    /// Create a new Nutrition with all zeros
    pub fn zero() -> Self {
        Self::default()
    }

    /// Scale nutrition values by a multiplier
    pub fn scale(&self, multiplier: f64) -> Self {
        Self {
            energy_kcal: self.energy_kcal * multiplier,
            protein_g: self.protein_g * multiplier,
            lipids_g: self.lipids_g * multiplier,
            carbs_g: self.carbs_g * multiplier,
            fiber_g: self.fiber_g * multiplier,
        }
    }

    /// Add another nutrition to this one
    pub fn add(&self, other: &Nutrition) -> Self {
        Self {
            energy_kcal: self.energy_kcal + other.energy_kcal,
            protein_g: self.protein_g + other.protein_g,
            lipids_g: self.lipids_g + other.lipids_g,
            carbs_g: self.carbs_g + other.carbs_g,
            fiber_g: self.fiber_g + other.fiber_g,
        }
    }

    /// Energy used as the denominator for macro shares.
    ///
    /// Falls back to the Atwater sum when no explicit energy is recorded.
    pub fn effective_energy_kcal(&self) -> f64 {
        if self.energy_kcal > 0.0 {
            self.energy_kcal
        } else {
            self.protein_g * KCAL_PER_G_PROTEIN
                + self.carbs_g * KCAL_PER_G_CARBS
                + self.lipids_g * KCAL_PER_G_FAT
        }
    }

    /// Carbohydrate share of energy, in percent. `None` without energy.
    pub fn carb_percent(&self) -> Option<f64> {
        let energy = self.effective_energy_kcal();
        (energy > 0.0).then(|| self.carbs_g * KCAL_PER_G_CARBS / energy * 100.0)
    }

    /// Fat share of energy, in percent. `None` without energy.
    pub fn fat_percent(&self) -> Option<f64> {
        let energy = self.effective_energy_kcal();
        (energy > 0.0).then(|| self.lipids_g * KCAL_PER_G_FAT / energy * 100.0)
    }

    /// Protein share of energy, in percent. `None` without energy.
    pub fn protein_percent(&self) -> Option<f64> {
        let energy = self.effective_energy_kcal();
        (energy > 0.0).then(|| self.protein_g * KCAL_PER_G_PROTEIN / energy * 100.0)
    }
}

impl std::ops::Add for Nutrition {
    type Output = Nutrition;

    fn add(self, other: Nutrition) -> Nutrition {
        Nutrition::add(&self, &other)
    }
}

impl std::ops::Mul<f64> for Nutrition {
    type Output = Nutrition;

    fn mul(self, multiplier: f64) -> Nutrition {
        self.scale(multiplier)
    }
}

impl std::iter::Sum for Nutrition {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Nutrition::zero(), |acc, n| acc + n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Nutrition {
        Nutrition {
            energy_kcal: 2000.0,
            protein_g: 100.0,
            lipids_g: 60.0,
            carbs_g: 265.0,
            fiber_g: 25.0,
        }
    }

    #[test]
    fn test_macro_shares() {
        let n = sample();
        assert!((n.carb_percent().unwrap() - 53.0).abs() < 1e-9);
        assert!((n.fat_percent().unwrap() - 27.0).abs() < 1e-9);
        assert!((n.protein_percent().unwrap() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_shares_without_energy() {
        assert_eq!(Nutrition::zero().carb_percent(), None);
        assert_eq!(Nutrition::zero().fat_percent(), None);
    }

    #[test]
    fn test_effective_energy_falls_back_to_atwater() {
        let n = Nutrition {
            energy_kcal: 0.0,
            protein_g: 10.0,
            lipids_g: 10.0,
            carbs_g: 10.0,
            fiber_g: 0.0,
        };
        assert!((n.effective_energy_kcal() - 170.0).abs() < 1e-9);
    }

    #[test]
    fn test_sum_and_scale() {
        let total: Nutrition = vec![sample(), sample() * 0.5].into_iter().sum();
        assert!((total.energy_kcal - 3000.0).abs() < 1e-9);
        assert!((total.protein_g - 150.0).abs() < 1e-9);
    }
}
