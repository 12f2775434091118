//! Data models
//!
//! Plain data passed into and returned from the engine.

mod athlete;
mod classification;
mod food_item;
mod metric;
mod nutrition;

pub use athlete::{Anthropometry, Athlete, Gender};
pub use classification::{ClassificationResult, OverallStatus, Status};
pub use food_item::{FoodCategory, FoodItem, DEFAULT_PORTION_G};
pub use metric::{Analyte, Domain, Measurement, Metric, MetricFamily};
pub use nutrition::{Nutrition, KCAL_PER_G_CARBS, KCAL_PER_G_FAT, KCAL_PER_G_PROTEIN};
