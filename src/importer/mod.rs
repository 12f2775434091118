//! Food composition importer
//!
//! Turns spreadsheet rows into `FoodItem`s. Numeric cells are coerced
//! leniently: blank or unparseable values become 0 and are counted as
//! recoveries, a missing glycemic index stays absent, and a zero net
//! weight becomes the 100 g default portion. A bad row never stops the
//! rest of the import.

pub mod csv;

use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;

use crate::engine::categories::normalize;
use crate::models::{FoodItem, Nutrition, DEFAULT_PORTION_G};
use crate::text::fold_key;

pub use self::csv::{import_csv_file, import_csv_str, parse_csv, CsvRows};

/// Importer error types
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Failed to open file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// One spreadsheet row: header to cell text
pub type RawRow = HashMap<String, String>;

/// A row with the source line it starts on
pub type NumberedRow = (usize, RawRow);

// Folded header names
pub const COL_NAME: &str = "alimento";
pub const COL_CATEGORY: &str = "categoria";
pub const COL_NET_WEIGHT: &str = "peso neto g";
pub const COL_ENERGY: &str = "energia kcal";
pub const COL_PROTEIN: &str = "proteina g";
pub const COL_LIPIDS: &str = "lipidos g";
pub const COL_CARBS: &str = "hidratos de carbono g";
pub const COL_FIBER: &str = "fibra g";
pub const COL_GLYCEMIC_INDEX: &str = "indice glucemico";

/// Canonical form of a header: folded, parentheses dropped, single spaces
pub fn normalize_header(header: &str) -> String {
    fold_key(header)
        .replace(['(', ')'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse a numeric cell, accepting a decimal comma. `None` for blank,
/// unparseable or non-finite text.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Outcome of an import run
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportReport {
    pub items: Vec<FoodItem>,
    pub total_rows: usize,
    pub imported: usize,
    /// Rows dropped because they had no food name
    pub skipped_rows: usize,
    /// Numeric fields replaced by a default
    pub recovered_fields: usize,
    pub errors: Vec<String>,
}

/// Row being converted, with header lookup by folded name
struct RowReader<'a> {
    cells: HashMap<String, &'a str>,
    line: usize,
}

impl<'a> RowReader<'a> {
    fn new(row: &'a RawRow, line: usize) -> Self {
        let cells = row
            .iter()
            .map(|(k, v)| (normalize_header(k), v.as_str()))
            .collect();
        Self { cells, line }
    }

    fn text(&self, column: &str) -> &'a str {
        self.cells.get(column).map(|s| (*s).trim()).unwrap_or("")
    }

    /// Blank or invalid becomes 0 and is recorded
    fn number(&self, column: &str, report: &mut ImportReport) -> f64 {
        let raw = self.text(column);
        match parse_number(raw) {
            Some(v) => v,
            None => {
                report.recovered_fields += 1;
                if !raw.is_empty() {
                    report.errors.push(format!(
                        "Row {}: invalid {} '{}', using 0",
                        self.line, column, raw
                    ));
                }
                0.0
            }
        }
    }

    /// Blank stays absent; invalid text becomes absent and is recorded
    fn optional_number(&self, column: &str, report: &mut ImportReport) -> Option<f64> {
        let raw = self.text(column);
        if raw.is_empty() {
            return None;
        }
        let parsed = parse_number(raw);
        if parsed.is_none() {
            report.recovered_fields += 1;
            report.errors.push(format!(
                "Row {}: invalid {} '{}', leaving it absent",
                self.line, column, raw
            ));
        }
        parsed
    }
}

/// Convert one row; `None` when the row has no food name
fn convert_row(row: &RawRow, line: usize, report: &mut ImportReport) -> Option<FoodItem> {
    let reader = RowReader::new(row, line);

    let name = reader.text(COL_NAME);
    if name.is_empty() {
        report.errors.push(format!("Row {}: missing food name", line));
        return None;
    }
    let raw_category = reader.text(COL_CATEGORY);

    let net_weight = reader.number(COL_NET_WEIGHT, report);
    let portion_g = if net_weight > 0.0 {
        net_weight
    } else {
        DEFAULT_PORTION_G
    };

    let nutrition = Nutrition {
        energy_kcal: reader.number(COL_ENERGY, report),
        protein_g: reader.number(COL_PROTEIN, report),
        lipids_g: reader.number(COL_LIPIDS, report),
        carbs_g: reader.number(COL_CARBS, report),
        fiber_g: reader.number(COL_FIBER, report),
    };

    Some(FoodItem {
        name: name.to_string(),
        category: normalize(raw_category, name),
        raw_category: raw_category.to_string(),
        portion_g,
        nutrition,
        glycemic_index: reader.optional_number(COL_GLYCEMIC_INDEX, report),
    })
}

/// Import a batch of rows. Each row carries its source line for messages.
pub fn import_rows(rows: &[NumberedRow]) -> ImportReport {
    let mut report = ImportReport {
        total_rows: rows.len(),
        ..ImportReport::default()
    };

    for (line, row) in rows {
        match convert_row(row, *line, &mut report) {
            Some(item) => report.items.push(item),
            None => report.skipped_rows += 1,
        }
    }
    report.imported = report.items.len();

    if report.recovered_fields > 0 {
        tracing::warn!(
            recovered = report.recovered_fields,
            skipped = report.skipped_rows,
            "Import substituted defaults for malformed fields"
        );
    }
    tracing::info!(
        total = report.total_rows,
        imported = report.imported,
        "Food import finished"
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FoodCategory;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn full_row(name: &str, category: &str, weight: &str) -> RawRow {
        row(&[
            ("Alimento", name),
            ("Categoría", category),
            ("Peso neto g", weight),
            ("Energía kcal", "52"),
            ("Proteína g", "0,3"),
            ("Lípidos g", "0.2"),
            ("Hidratos de carbono g", "14"),
            ("Fibra g", "2.4"),
            ("Índice glucémico", "36"),
        ])
    }

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("Peso neto (g)"), "peso neto g");
        assert_eq!(normalize_header("  ÍNDICE  Glucémico "), "indice glucemico");
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("12,5"), Some(12.5));
        assert_eq!(parse_number(" 7 "), Some(7.0));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("n/d"), None);
        assert_eq!(parse_number("inf"), None);
    }

    #[test]
    fn test_full_row() {
        let report = import_rows(&[(2, full_row("Manzana", "Frutas y Verduras (AOA)", "130"))]);
        assert_eq!(report.imported, 1);
        assert_eq!(report.recovered_fields, 0);

        let item = &report.items[0];
        assert_eq!(item.category, FoodCategory::Frutas);
        assert_eq!(item.portion_g, 130.0);
        assert_eq!(item.nutrition.protein_g, 0.3);
        assert_eq!(item.glycemic_index, Some(36.0));
    }

    #[test]
    fn test_blank_net_weight_uses_default_portion() {
        let report = import_rows(&[(2, full_row("Pan", "Cereales", ""))]);
        let item = &report.items[0];
        assert_eq!(item.portion_g, DEFAULT_PORTION_G);
        assert_eq!(report.recovered_fields, 1);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_invalid_numbers_become_zero() {
        let mut r = full_row("Huevo", "AOA moderado", "50");
        r.insert("Energía kcal".to_string(), "setenta".to_string());
        r.remove("Fibra g");
        let report = import_rows(&[(5, r)]);

        let item = &report.items[0];
        assert_eq!(item.nutrition.energy_kcal, 0.0);
        assert_eq!(item.nutrition.fiber_g, 0.0);
        assert_eq!(report.recovered_fields, 2);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].starts_with("Row 5"));
    }

    #[test]
    fn test_glycemic_index_absent_not_zero() {
        let mut r = full_row("Pollo", "AOA", "100");
        r.insert("Índice glucémico".to_string(), "".to_string());
        let report = import_rows(&[(2, r)]);
        assert_eq!(report.items[0].glycemic_index, None);
        assert_eq!(report.recovered_fields, 0);

        let mut r = full_row("Pollo", "AOA", "100");
        r.insert("Índice glucémico".to_string(), "alto".to_string());
        let report = import_rows(&[(2, r)]);
        assert_eq!(report.items[0].glycemic_index, None);
        assert_eq!(report.recovered_fields, 1);
    }

    #[test]
    fn test_nameless_rows_skipped_without_halting() {
        let rows = vec![
            (2, full_row("", "Cereales", "30")),
            (3, full_row("Avena", "Cereales", "30")),
        ];
        let report = import_rows(&rows);
        assert_eq!(report.total_rows, 2);
        assert_eq!(report.skipped_rows, 1);
        assert_eq!(report.imported, 1);
        assert_eq!(report.items[0].name, "Avena");
    }

    #[test]
    fn test_category_falls_back_on_name() {
        let report = import_rows(&[(2, full_row("Aceite de oliva", "Otros", "5"))]);
        assert_eq!(report.items[0].category, FoodCategory::Grasas);
    }
}
