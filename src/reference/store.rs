//! Reference data handle
//!
//! Publishes one validated `ReferenceData` at a time. Readers take an `Arc`
//! snapshot; replacement swaps the whole `Arc`, so an evaluation never sees
//! a mix of old and new tables.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use serde::Serialize;

use super::data::{ReferenceData, ReferenceResult};

/// Where the published dataset came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "path", rename_all = "lowercase")]
pub enum ReferenceSource {
    Builtin,
    File(PathBuf),
}

impl std::fmt::Display for ReferenceSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReferenceSource::Builtin => f.write_str("builtin"),
            ReferenceSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

struct Published {
    data: Arc<ReferenceData>,
    source: ReferenceSource,
}

/// Shared, swappable reference data
pub struct ReferenceStore {
    current: RwLock<Published>,
    /// Configured default sport, applied to every dataset published here
    default_sport_override: Option<String>,
}

impl ReferenceStore {
    /// Validate and publish a dataset, keeping its own default sport
    pub fn new(data: ReferenceData, source: ReferenceSource) -> ReferenceResult<Self> {
        Self::with_default_sport_override(data, source, None)
    }

    /// Validate and publish a dataset. A `default_sport` override replaces
    /// the dataset's default now and on every later reload.
    pub fn with_default_sport_override(
        data: ReferenceData,
        source: ReferenceSource,
        default_sport: Option<String>,
    ) -> ReferenceResult<Self> {
        let data = apply_default_sport(data, default_sport.as_deref())?;
        tracing::info!(
            version = %data.version,
            source = %source,
            bands = data.bands.len(),
            sports = data.sports.len(),
            "Reference data loaded"
        );
        Ok(Self {
            current: RwLock::new(Published {
                data: Arc::new(data),
                source,
            }),
            default_sport_override: default_sport,
        })
    }

    pub fn builtin() -> ReferenceResult<Self> {
        Self::new(ReferenceData::builtin(), ReferenceSource::Builtin)
    }

    /// Load from a JSON file; nothing is published if the file is invalid
    pub fn from_file<P: AsRef<Path>>(path: P) -> ReferenceResult<Self> {
        let data = ReferenceData::from_json_file(path.as_ref())?;
        Self::new(data, ReferenceSource::File(path.as_ref().to_path_buf()))
    }

    /// Current dataset. Holding the snapshot pins that version.
    pub fn snapshot(&self) -> Arc<ReferenceData> {
        // A poisoned lock still holds a fully written Arc
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard.data)
    }

    pub fn source(&self) -> ReferenceSource {
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        guard.source.clone()
    }

    pub fn default_sport_override(&self) -> Option<&str> {
        self.default_sport_override.as_deref()
    }

    /// Validate `data`, then swap it in. On error the previous data stays.
    pub fn replace(&self, data: ReferenceData, source: ReferenceSource) -> ReferenceResult<Arc<ReferenceData>> {
        let data = Arc::new(apply_default_sport(data, self.default_sport_override())?);
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        let previous = std::mem::replace(
            &mut *guard,
            Published {
                data: Arc::clone(&data),
                source: source.clone(),
            },
        );
        tracing::info!(
            from = %previous.data.version,
            to = %data.version,
            source = %source,
            "Reference data replaced"
        );
        Ok(data)
    }

    /// Re-read a JSON file and swap it in
    pub fn reload_from_file<P: AsRef<Path>>(&self, path: P) -> ReferenceResult<Arc<ReferenceData>> {
        let path = path.as_ref();
        let data = match ReferenceData::from_json_file(path) {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Reference reload rejected");
                return Err(e);
            }
        };
        self.replace(data, ReferenceSource::File(path.to_path_buf()))
    }
}

fn apply_default_sport(data: ReferenceData, default_sport: Option<&str>) -> ReferenceResult<ReferenceData> {
    match default_sport {
        Some(key) => data.with_default_sport(key),
        None => data.validated(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_snapshot_survives_replace() {
        let store = ReferenceStore::builtin().unwrap();
        let before = store.snapshot();

        let mut next = ReferenceData::builtin();
        next.version = "v2".to_string();
        store.replace(next, ReferenceSource::Builtin).unwrap();

        assert_eq!(before.version, crate::reference::BUILTIN_VERSION);
        assert_eq!(store.snapshot().version, "v2");
    }

    #[test]
    fn test_invalid_replacement_keeps_previous() {
        let store = ReferenceStore::builtin().unwrap();
        let mut bad = ReferenceData::builtin();
        bad.version = "bad".to_string();
        bad.default_sport = "remo".to_string();

        assert!(store.replace(bad, ReferenceSource::Builtin).is_err());
        assert_eq!(store.snapshot().version, crate::reference::BUILTIN_VERSION);
        assert_eq!(store.source(), ReferenceSource::Builtin);
    }

    #[test]
    fn test_reload_from_file() {
        let store = ReferenceStore::builtin().unwrap();
        let mut data = ReferenceData::builtin();
        data.version = "file-v1".to_string();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(data.to_json_pretty().unwrap().as_bytes()).unwrap();

        store.reload_from_file(file.path()).unwrap();
        assert_eq!(store.snapshot().version, "file-v1");
        assert_eq!(store.source(), ReferenceSource::File(file.path().to_path_buf()));
    }

    #[test]
    fn test_reload_from_bad_file_keeps_previous() {
        let store = ReferenceStore::builtin().unwrap();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not json").unwrap();

        assert!(store.reload_from_file(file.path()).is_err());
        assert_eq!(store.snapshot().version, crate::reference::BUILTIN_VERSION);
    }

    #[test]
    fn test_default_sport_override_survives_file_reload() {
        let mut data = ReferenceData::builtin();
        data.version = "club-2025".to_string();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(data.to_json_pretty().unwrap().as_bytes()).unwrap();

        let store = ReferenceStore::with_default_sport_override(
            ReferenceData::builtin(),
            ReferenceSource::Builtin,
            Some("Natación".to_string()),
        )
        .unwrap();
        assert_eq!(store.snapshot().default_sport, "natacion");

        store.reload_from_file(file.path()).unwrap();
        let snap = store.snapshot();
        assert_eq!(snap.version, "club-2025");
        assert_eq!(snap.default_sport, "natacion");
    }

    #[test]
    fn test_reload_without_override_uses_file_default() {
        let mut data = ReferenceData::builtin().with_default_sport("baloncesto").unwrap();
        data.version = "club-2025".to_string();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(data.to_json_pretty().unwrap().as_bytes()).unwrap();

        let store = ReferenceStore::builtin().unwrap();
        assert!(store.default_sport_override().is_none());
        store.reload_from_file(file.path()).unwrap();
        assert_eq!(store.snapshot().default_sport, "baloncesto");
    }

    #[test]
    fn test_concurrent_readers_see_whole_versions() {
        let store = Arc::new(ReferenceStore::builtin().unwrap());
        let readers: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for _ in 0..200 {
                        let snap = store.snapshot();
                        // Each published version carries its own default sport
                        let expected = if snap.version == "swim" { "natacion" } else { "futbol" };
                        assert_eq!(snap.default_sport, expected);
                    }
                })
            })
            .collect();

        for i in 0..50 {
            let mut data = ReferenceData::builtin();
            if i % 2 == 0 {
                data.version = "swim".to_string();
                data.default_sport = "natacion".to_string();
            }
            store.replace(data, ReferenceSource::Builtin).unwrap();
        }

        for reader in readers {
            reader.join().unwrap();
        }
    }
}
