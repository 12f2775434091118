//! ABCD Nutritional Reference & Classification Engine
//!
//! Classifies youth-athlete measurements against age and gender reference
//! bands, estimates growth percentiles, derives sport-adjusted targets and
//! aggregates everything into one nutritional status.

pub mod build_info;
pub mod config;
pub mod engine;
pub mod importer;
pub mod mcp;
pub mod models;
pub mod reference;
pub mod text;
pub mod tools;
