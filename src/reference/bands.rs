//! Age/gender reference bands
//!
//! Anthropometric, biochemical and dietary ranges for one age group and
//! gender, plus the built-in dataset covering ages 5 to 18.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{Analyte, Gender};

/// Youngest age every dataset must cover
pub const MIN_COVERED_AGE: u32 = 5;
/// Oldest age every dataset must cover
pub const MAX_COVERED_AGE: u32 = 18;

/// Closed numeric interval `[lo, hi]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub lo: f64,
    pub hi: f64,
}

impl Range {
    pub const fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    /// Inclusive on both ends
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lo && value <= self.hi
    }

    pub fn is_ordered(&self) -> bool {
        self.lo.is_finite() && self.hi.is_finite() && self.lo <= self.hi
    }

    pub fn scale(&self, factor: f64) -> Self {
        Self::new(self.lo * factor, self.hi * factor)
    }
}

/// Inclusive age range in whole years
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgeGroup {
    pub min_age: u32,
    pub max_age: u32,
}

impl AgeGroup {
    pub const fn new(min_age: u32, max_age: u32) -> Self {
        Self { min_age, max_age }
    }

    pub fn contains(&self, age: u32) -> bool {
        age >= self.min_age && age <= self.max_age
    }

    pub fn overlaps(&self, other: &AgeGroup) -> bool {
        self.min_age <= other.max_age && other.min_age <= self.max_age
    }

    /// Label such as `"9-13"`
    pub fn label(&self) -> String {
        format!("{}-{}", self.min_age, self.max_age)
    }
}

/// BMI thresholds. `normal.hi` usually equals `overweight`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BmiBand {
    pub underweight: f64,
    pub normal: Range,
    pub overweight: f64,
    pub obese: f64,
}

/// Body fat percentage thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyFatBand {
    pub low: f64,
    pub normal: Range,
    pub high: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnthropometryBand {
    pub bmi: BmiBand,
    pub body_fat: BodyFatBand,
}

/// Daily dietary reference ranges
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DietaryBand {
    pub calories_per_kg: Range,
    pub protein_per_kg: Range,
    pub carb_percent: Range,
    pub fat_percent: Range,
}

/// All reference ranges for one (age group, gender) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceBand {
    pub age_group: AgeGroup,
    pub gender: Gender,
    pub anthropometry: AnthropometryBand,
    pub biochemistry: BTreeMap<Analyte, Range>,
    pub dietary: DietaryBand,
}

impl ReferenceBand {
    pub fn matches(&self, age: u32, gender: Gender) -> bool {
        self.gender == gender && self.age_group.contains(age)
    }

    /// Band label such as `"9-13/male"`
    pub fn label(&self) -> String {
        format!("{}/{}", self.age_group.label(), self.gender)
    }

    pub fn analyte_range(&self, analyte: Analyte) -> Option<Range> {
        self.biochemistry.get(&analyte).copied()
    }
}

// ============================================================================
// Built-in dataset
// ============================================================================

struct BandRow {
    group: AgeGroup,
    gender: Gender,
    bmi: [f64; 4],
    body_fat: [f64; 4],
    hemoglobin: Range,
    hematocrit: Range,
    calories_per_kg: Range,
    protein_per_kg: Range,
}

const CHILD: AgeGroup = AgeGroup::new(5, 8);
const PRETEEN: AgeGroup = AgeGroup::new(9, 13);
const TEEN: AgeGroup = AgeGroup::new(14, 18);

// bmi: [underweight, normal hi, overweight, obese]; normal lo = underweight
// body_fat: [low, normal lo, normal hi, high]
const BAND_ROWS: [BandRow; 6] = [
    BandRow {
        group: CHILD,
        gender: Gender::Male,
        bmi: [14.0, 17.5, 17.5, 19.5],
        body_fat: [8.0, 10.0, 20.0, 25.0],
        hemoglobin: Range::new(11.5, 15.5),
        hematocrit: Range::new(35.0, 45.0),
        calories_per_kg: Range::new(70.0, 90.0),
        protein_per_kg: Range::new(1.0, 1.5),
    },
    BandRow {
        group: CHILD,
        gender: Gender::Female,
        bmi: [13.8, 17.8, 17.8, 20.0],
        body_fat: [10.0, 12.0, 22.0, 27.0],
        hemoglobin: Range::new(11.5, 15.5),
        hematocrit: Range::new(35.0, 45.0),
        calories_per_kg: Range::new(65.0, 85.0),
        protein_per_kg: Range::new(1.0, 1.5),
    },
    BandRow {
        group: PRETEEN,
        gender: Gender::Male,
        bmi: [15.0, 21.0, 21.0, 25.0],
        body_fat: [8.0, 10.0, 22.0, 27.0],
        hemoglobin: Range::new(12.0, 16.0),
        hematocrit: Range::new(36.0, 47.0),
        calories_per_kg: Range::new(55.0, 75.0),
        protein_per_kg: Range::new(1.2, 1.8),
    },
    BandRow {
        group: PRETEEN,
        gender: Gender::Female,
        bmi: [14.8, 21.5, 21.5, 25.5],
        body_fat: [12.0, 15.0, 25.0, 30.0],
        hemoglobin: Range::new(12.0, 16.0),
        hematocrit: Range::new(36.0, 46.0),
        calories_per_kg: Range::new(50.0, 70.0),
        protein_per_kg: Range::new(1.2, 1.8),
    },
    BandRow {
        group: TEEN,
        gender: Gender::Male,
        bmi: [17.5, 24.5, 24.5, 28.5],
        body_fat: [6.0, 8.0, 19.0, 25.0],
        hemoglobin: Range::new(13.0, 17.0),
        hematocrit: Range::new(40.0, 50.0),
        calories_per_kg: Range::new(45.0, 60.0),
        protein_per_kg: Range::new(1.2, 2.0),
    },
    BandRow {
        group: TEEN,
        gender: Gender::Female,
        bmi: [17.0, 24.0, 24.0, 28.5],
        body_fat: [14.0, 17.0, 28.0, 32.0],
        hemoglobin: Range::new(12.0, 16.0),
        hematocrit: Range::new(36.0, 46.0),
        calories_per_kg: Range::new(40.0, 55.0),
        protein_per_kg: Range::new(1.2, 1.8),
    },
];

impl BandRow {
    fn to_band(&self) -> ReferenceBand {
        let [underweight, normal_hi, overweight, obese] = self.bmi;
        let [low, normal_lo, fat_hi, high] = self.body_fat;

        let biochemistry = BTreeMap::from([
            (Analyte::Hemoglobin, self.hemoglobin),
            (Analyte::Hematocrit, self.hematocrit),
            (Analyte::Iron, Range::new(50.0, 150.0)),
            (Analyte::Ferritin, Range::new(20.0, 200.0)),
            (Analyte::VitaminD, Range::new(30.0, 100.0)),
            (Analyte::Glucose, Range::new(70.0, 100.0)),
        ]);

        ReferenceBand {
            age_group: self.group,
            gender: self.gender,
            anthropometry: AnthropometryBand {
                bmi: BmiBand {
                    underweight,
                    normal: Range::new(underweight, normal_hi),
                    overweight,
                    obese,
                },
                body_fat: BodyFatBand {
                    low,
                    normal: Range::new(normal_lo, fat_hi),
                    high,
                },
            },
            biochemistry,
            dietary: DietaryBand {
                calories_per_kg: self.calories_per_kg,
                protein_per_kg: self.protein_per_kg,
                carb_percent: Range::new(45.0, 65.0),
                fat_percent: Range::new(25.0, 35.0),
            },
        }
    }
}

/// The built-in bands for ages 5 to 18, both genders
pub fn builtin_bands() -> Vec<ReferenceBand> {
    BAND_ROWS.iter().map(BandRow::to_band).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_is_closed() {
        let r = Range::new(15.0, 21.0);
        assert!(r.contains(15.0));
        assert!(r.contains(21.0));
        assert!(!r.contains(21.0001));
        assert!(!r.contains(f64::NAN));
    }

    #[test]
    fn test_age_group_overlap() {
        assert!(!CHILD.overlaps(&PRETEEN));
        assert!(AgeGroup::new(8, 10).overlaps(&PRETEEN));
        assert_eq!(PRETEEN.label(), "9-13");
    }

    #[test]
    fn test_builtin_preteen_male_band() {
        let bands = builtin_bands();
        let band = bands
            .iter()
            .find(|b| b.matches(12, Gender::Male))
            .unwrap();
        assert_eq!(band.label(), "9-13/male");
        assert_eq!(band.anthropometry.bmi.normal, Range::new(15.0, 21.0));
        assert_eq!(band.anthropometry.bmi.overweight, 21.0);
        assert_eq!(band.anthropometry.bmi.obese, 25.0);
    }

    #[test]
    fn test_builtin_bands_are_internally_consistent() {
        for band in builtin_bands() {
            let bmi = band.anthropometry.bmi;
            assert!(bmi.normal.is_ordered(), "{}", band.label());
            assert!(bmi.underweight <= bmi.normal.lo);
            assert!(bmi.normal.hi <= bmi.overweight);
            assert!(bmi.overweight < bmi.obese);

            let fat = band.anthropometry.body_fat;
            assert!(fat.low <= fat.normal.lo && fat.normal.hi <= fat.high);

            assert_eq!(band.biochemistry.len(), Analyte::ALL.len());
        }
    }
}
