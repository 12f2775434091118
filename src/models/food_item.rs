//! Food Item model
//!
//! A food composition row produced by the spreadsheet importer, tagged with
//! one of the fixed food categories.

use serde::{Deserialize, Serialize};

use super::Nutrition;

/// Portion weight used when a row carries no usable net weight
pub const DEFAULT_PORTION_G: f64 = 100.0;

/// Fixed food category taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoodCategory {
    Cereales,
    Proteinas,
    Lacteos,
    Frutas,
    Verduras,
    Grasas,
    Leguminosas,
    Azucares,
    Bebidas,
}

impl FoodCategory {
    pub const ALL: [FoodCategory; 9] = [
        FoodCategory::Cereales,
        FoodCategory::Proteinas,
        FoodCategory::Lacteos,
        FoodCategory::Frutas,
        FoodCategory::Verduras,
        FoodCategory::Grasas,
        FoodCategory::Leguminosas,
        FoodCategory::Azucares,
        FoodCategory::Bebidas,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FoodCategory::Cereales => "cereales",
            FoodCategory::Proteinas => "proteinas",
            FoodCategory::Lacteos => "lacteos",
            FoodCategory::Frutas => "frutas",
            FoodCategory::Verduras => "verduras",
            FoodCategory::Grasas => "grasas",
            FoodCategory::Leguminosas => "leguminosas",
            FoodCategory::Azucares => "azucares",
            FoodCategory::Bebidas => "bebidas",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FoodCategory::Cereales => "Cereales",
            FoodCategory::Proteinas => "Alimentos de origen animal",
            FoodCategory::Lacteos => "Leche y lácteos",
            FoodCategory::Frutas => "Frutas",
            FoodCategory::Verduras => "Verduras",
            FoodCategory::Grasas => "Aceites y grasas",
            FoodCategory::Leguminosas => "Leguminosas",
            FoodCategory::Azucares => "Azúcares",
            FoodCategory::Bebidas => "Bebidas",
        }
    }
}

impl std::fmt::Display for FoodCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A food with nutrition per portion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    pub name: String,
    pub category: FoodCategory,
    /// Source category label before normalization
    pub raw_category: String,
    pub portion_g: f64,
    pub nutrition: Nutrition,
    /// Absent when the source row had no glycemic index
    pub glycemic_index: Option<f64>,
}

impl FoodItem {
    /// Nutrition for an arbitrary weight in grams, scaled from the portion
    pub fn nutrition_for_grams(&self, grams: f64) -> Nutrition {
        if self.portion_g <= 0.0 {
            return Nutrition::zero();
        }
        self.nutrition.scale(grams / self.portion_g)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_names_are_distinct() {
        let mut names: Vec<&str> = FoodCategory::ALL.iter().map(|c| c.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 9);
    }

    #[test]
    fn test_category_serde_lowercase() {
        let json = serde_json::to_string(&FoodCategory::Leguminosas).unwrap();
        assert_eq!(json, r#""leguminosas""#);
    }

    #[test]
    fn test_nutrition_for_grams() {
        let item = FoodItem {
            name: "Arroz".to_string(),
            category: FoodCategory::Cereales,
            raw_category: "Cereales".to_string(),
            portion_g: 50.0,
            nutrition: Nutrition {
                energy_kcal: 180.0,
                protein_g: 3.5,
                lipids_g: 0.3,
                carbs_g: 40.0,
                fiber_g: 0.5,
            },
            glycemic_index: Some(73.0),
        };
        let scaled = item.nutrition_for_grams(100.0);
        assert!((scaled.energy_kcal - 360.0).abs() < 1e-9);
        assert!((scaled.carbs_g - 80.0).abs() < 1e-9);
    }
}
