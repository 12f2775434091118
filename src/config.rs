//! Runtime configuration
//!
//! Read from the environment at startup:
//! - `ABCD_REFERENCE_PATH`: JSON reference dataset replacing the built-in one
//! - `ABCD_DEFAULT_SPORT`: default sport key for unknown sports
//! - `RUST_LOG`: log filter, read by the subscriber in `main`

use std::path::PathBuf;

use crate::reference::{ReferenceData, ReferenceResult, ReferenceSource, ReferenceStore};

pub const REFERENCE_PATH_VAR: &str = "ABCD_REFERENCE_PATH";
pub const DEFAULT_SPORT_VAR: &str = "ABCD_DEFAULT_SPORT";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineConfig {
    pub reference_path: Option<PathBuf>,
    pub default_sport: Option<String>,
}

/// Unset and blank variables are treated the same
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Build from any variable source
    pub fn from_vars<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            reference_path: non_blank(get(REFERENCE_PATH_VAR)).map(PathBuf::from),
            default_sport: non_blank(get(DEFAULT_SPORT_VAR)),
        }
    }

    /// Load, validate and publish the configured reference dataset
    pub fn build_store(&self) -> ReferenceResult<ReferenceStore> {
        let (data, source) = match &self.reference_path {
            Some(path) => (
                ReferenceData::from_json_file(path)?,
                ReferenceSource::File(path.clone()),
            ),
            None => (ReferenceData::builtin(), ReferenceSource::Builtin),
        };

        ReferenceStore::with_default_sport_override(data, source, self.default_sport.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::ReferenceError;
    use std::collections::HashMap;
    use std::io::Write;

    fn config(vars: &[(&str, &str)]) -> EngineConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EngineConfig::from_vars(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let cfg = config(&[]);
        assert_eq!(cfg, EngineConfig::default());

        let store = cfg.build_store().unwrap();
        assert_eq!(store.source(), ReferenceSource::Builtin);
        assert_eq!(store.snapshot().default_sport, "futbol");
    }

    #[test]
    fn test_blank_values_ignored() {
        let cfg = config(&[(REFERENCE_PATH_VAR, "  "), (DEFAULT_SPORT_VAR, "")]);
        assert_eq!(cfg, EngineConfig::default());
    }

    #[test]
    fn test_default_sport_override() {
        let cfg = config(&[(DEFAULT_SPORT_VAR, "Natación")]);
        let store = cfg.build_store().unwrap();
        assert_eq!(store.snapshot().default_sport, "natacion");
    }

    #[test]
    fn test_unknown_default_sport_rejected() {
        let cfg = config(&[(DEFAULT_SPORT_VAR, "remo")]);
        assert!(matches!(
            cfg.build_store(),
            Err(ReferenceError::MissingDefaultSport(_))
        ));
    }

    #[test]
    fn test_reference_file() {
        let mut data = ReferenceData::builtin();
        data.version = "club-2025".to_string();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(data.to_json_pretty().unwrap().as_bytes())
            .unwrap();

        let cfg = config(&[(REFERENCE_PATH_VAR, file.path().to_str().unwrap())]);
        let store = cfg.build_store().unwrap();
        assert_eq!(store.snapshot().version, "club-2025");
        assert_eq!(
            store.source(),
            ReferenceSource::File(file.path().to_path_buf())
        );
    }

    #[test]
    fn test_missing_reference_file_fails() {
        let cfg = config(&[(REFERENCE_PATH_VAR, "/nonexistent/abcd.json")]);
        assert!(matches!(cfg.build_store(), Err(ReferenceError::Io(_))));
    }
}
