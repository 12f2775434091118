//! Reference data module
//!
//! Age/gender bands, growth percentile tables and sport profiles, loaded
//! once and shared read-only.

pub mod bands;
pub mod data;
pub mod growth;
pub mod sports;
pub mod store;

pub use bands::{
    AgeGroup, AnthropometryBand, BmiBand, BodyFatBand, DietaryBand, Range, ReferenceBand,
    MAX_COVERED_AGE, MIN_COVERED_AGE,
};
pub use data::{ReferenceData, ReferenceError, ReferenceResult, BUILTIN_VERSION};
pub use growth::{
    GrowthEntry, GrowthMetric, GrowthTable, PercentileCutPoints, PERCENTILE_STEPS, TOP_PERCENTILE,
};
pub use sports::{normalize_sport_key, SportProfile, DEFAULT_SPORT_KEY};
pub use store::{ReferenceSource, ReferenceStore};
