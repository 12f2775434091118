//! Food MCP Tools
//!
//! Category normalization and food composition import.

use serde::Serialize;

use crate::engine::normalize;
use crate::importer::{import_csv_file, ImportReport};
use crate::models::{FoodCategory, FoodItem};

/// Response for normalize_food_category
#[derive(Debug, Serialize)]
pub struct NormalizeCategoryResponse {
    pub raw_category: String,
    pub food_name: String,
    pub category: FoodCategory,
    pub display_name: &'static str,
}

pub fn normalize_food_category(raw_category: &str, food_name: &str) -> NormalizeCategoryResponse {
    let category = normalize(raw_category, food_name);
    NormalizeCategoryResponse {
        raw_category: raw_category.to_string(),
        food_name: food_name.to_string(),
        category,
        display_name: category.display_name(),
    }
}

/// Response for import_food_csv
#[derive(Debug, Serialize)]
pub struct ImportFoodResponse {
    pub file_path: String,
    pub total_rows: usize,
    pub imported: usize,
    pub skipped_rows: usize,
    pub recovered_fields: usize,
    /// Items per category, in taxonomy order
    pub by_category: Vec<CategoryCount>,
    pub errors: Vec<String>,
    /// Present only when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<FoodItem>>,
}

#[derive(Debug, Serialize)]
pub struct CategoryCount {
    pub category: FoodCategory,
    pub count: usize,
}

fn count_by_category(items: &[FoodItem]) -> Vec<CategoryCount> {
    FoodCategory::ALL
        .iter()
        .map(|&category| CategoryCount {
            category,
            count: items.iter().filter(|i| i.category == category).count(),
        })
        .filter(|c| c.count > 0)
        .collect()
}

pub fn import_food_csv(file_path: &str, include_items: bool) -> Result<ImportFoodResponse, String> {
    let report: ImportReport = import_csv_file(file_path).map_err(|e| e.to_string())?;

    Ok(ImportFoodResponse {
        file_path: file_path.to_string(),
        total_rows: report.total_rows,
        imported: report.imported,
        skipped_rows: report.skipped_rows,
        recovered_fields: report.recovered_fields,
        by_category: count_by_category(&report.items),
        errors: report.errors,
        items: include_items.then_some(report.items),
    })
}
