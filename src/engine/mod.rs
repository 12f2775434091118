//! Classification engine
//!
//! Pure, synchronous functions over a `ReferenceData` snapshot. Safe to
//! call from any number of threads at once.

pub mod aggregator;
pub mod assessment;
pub mod categories;
pub mod classifier;
pub mod percentile;
pub mod sport;

pub use aggregator::{aggregate, aggregate_report, severity_of, AggregateReport};
pub use assessment::{assess, AthleteAssessment, DomainStatus, GrowthPercentile};
pub use categories::normalize;
pub use classifier::{classify, classify_bmi, classify_intake, classify_range};
pub use percentile::{estimate_percentile, percentile_from_cut_points, FALLBACK_PERCENTILE};
pub use sport::{derive_targets, resolve_sport, SportTargets};
