//! Reference Data MCP Tools
//!
//! Band lookup, sport listing and reloading the published dataset.

use serde::Serialize;

use crate::reference::{Range, ReferenceBand, ReferenceData, ReferenceSource, ReferenceStore};

use super::classification::parse_gender;

/// Response for get_reference_band
#[derive(Debug, Serialize)]
pub struct ReferenceBandResponse {
    pub reference_version: String,
    pub label: String,
    #[serde(flatten)]
    pub band: ReferenceBand,
}

pub fn get_reference_band(
    data: &ReferenceData,
    age: u32,
    gender: &str,
) -> Result<Option<ReferenceBandResponse>, String> {
    let gender = parse_gender(gender)?;
    Ok(data.band_for(age, gender).map(|band| ReferenceBandResponse {
        reference_version: data.version.clone(),
        label: band.label(),
        band: band.clone(),
    }))
}

/// Sport summary for list results
#[derive(Debug, Serialize)]
pub struct SportSummary {
    pub key: String,
    pub name: String,
    pub calorie_multiplier: f64,
    pub protein_per_kg: Range,
    pub carbs_per_kg: Range,
    pub hydration_ml_per_hour: f64,
    pub is_default: bool,
}

/// Response for list_sports
#[derive(Debug, Serialize)]
pub struct ListSportsResponse {
    pub sports: Vec<SportSummary>,
    pub default_sport: String,
    pub total: usize,
}

pub fn list_sports(data: &ReferenceData) -> ListSportsResponse {
    let sports: Vec<SportSummary> = data
        .sports
        .iter()
        .map(|s| SportSummary {
            key: s.key.clone(),
            name: s.name.clone(),
            calorie_multiplier: s.calorie_multiplier,
            protein_per_kg: s.protein_per_kg,
            carbs_per_kg: s.carbs_per_kg,
            hydration_ml_per_hour: s.hydration_ml_per_hour,
            is_default: s.key == data.default_sport,
        })
        .collect();

    ListSportsResponse {
        total: sports.len(),
        default_sport: data.default_sport.clone(),
        sports,
    }
}

/// Response for reload_reference_data
#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub success: bool,
    pub previous_version: String,
    pub version: String,
    pub source: ReferenceSource,
    pub bands: usize,
    pub sports: usize,
}

/// Reload from `path`, or from the current source when `path` is `None`.
/// A rejected dataset leaves the published one in place.
pub fn reload_reference_data(store: &ReferenceStore, path: Option<&str>) -> Result<ReloadResponse, String> {
    let previous_version = store.snapshot().version.clone();

    let result = match (path, store.source()) {
        (Some(path), _) => store.reload_from_file(path),
        (None, ReferenceSource::File(path)) => store.reload_from_file(path),
        (None, ReferenceSource::Builtin) => store.replace(ReferenceData::builtin(), ReferenceSource::Builtin),
    };
    let data = result.map_err(|e| format!("Reference reload failed: {}", e))?;

    Ok(ReloadResponse {
        success: true,
        previous_version,
        version: data.version.clone(),
        source: store.source(),
        bands: data.bands.len(),
        sports: data.sports.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_get_reference_band() {
        let data = ReferenceData::builtin();
        let band = get_reference_band(&data, 12, "male").unwrap().unwrap();
        assert_eq!(band.label, "9-13/male");
        assert_eq!(band.band.anthropometry.bmi.overweight, 21.0);

        assert!(get_reference_band(&data, 30, "male").unwrap().is_none());
        assert!(get_reference_band(&data, 12, "otro").is_err());
    }

    #[test]
    fn test_list_sports_marks_default() {
        let data = ReferenceData::builtin();
        let response = list_sports(&data);
        assert_eq!(response.total, data.sports.len());
        let defaults: Vec<_> = response.sports.iter().filter(|s| s.is_default).collect();
        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults[0].key, "futbol");
    }

    #[test]
    fn test_reload_from_file_then_current_source() {
        let store = ReferenceStore::builtin().unwrap();
        let mut data = ReferenceData::builtin();
        data.version = "club-2025".to_string();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(data.to_json_pretty().unwrap().as_bytes()).unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let response = reload_reference_data(&store, Some(&path)).unwrap();
        assert_eq!(response.previous_version, crate::reference::BUILTIN_VERSION);
        assert_eq!(response.version, "club-2025");

        let again = reload_reference_data(&store, None).unwrap();
        assert_eq!(again.previous_version, "club-2025");
        assert_eq!(again.source, ReferenceSource::File(file.path().to_path_buf()));
    }

    #[test]
    fn test_rejected_reload_keeps_current_data() {
        let store = ReferenceStore::builtin().unwrap();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{\"version\": \"broken\"").unwrap();

        let err = reload_reference_data(&store, file.path().to_str()).unwrap_err();
        assert!(err.starts_with("Reference reload failed"));
        assert_eq!(store.snapshot().version, crate::reference::BUILTIN_VERSION);
    }

    #[test]
    fn test_reload_keeps_configured_default_sport() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(ReferenceData::builtin().to_json_pretty().unwrap().as_bytes())
            .unwrap();
        let config = crate::config::EngineConfig {
            reference_path: Some(file.path().to_path_buf()),
            default_sport: Some("natacion".to_string()),
        };
        let store = config.build_store().unwrap();
        assert_eq!(store.snapshot().default_sport, "natacion");

        reload_reference_data(&store, None).unwrap();
        assert_eq!(store.snapshot().default_sport, "natacion");
        assert_eq!(list_sports(&store.snapshot()).default_sport, "natacion");

        let builtin = crate::config::EngineConfig {
            reference_path: None,
            default_sport: Some("natacion".to_string()),
        }
        .build_store()
        .unwrap();
        reload_reference_data(&builtin, None).unwrap();
        assert_eq!(builtin.snapshot().default_sport, "natacion");
    }

    #[test]
    fn test_reload_builtin() {
        let store = ReferenceStore::builtin().unwrap();
        let response = reload_reference_data(&store, None).unwrap();
        assert_eq!(response.source, ReferenceSource::Builtin);
        assert_eq!(response.version, crate::reference::BUILTIN_VERSION);
    }
}
