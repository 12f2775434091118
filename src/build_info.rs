//! Build metadata
//!
//! Build number and timestamp are embedded by `build.rs`. The banner also
//! names the reference dataset the server starts with.

use serde::Serialize;

use crate::reference::{ReferenceStore, BUILTIN_VERSION};

/// Build number, incremented on each recompilation
pub const BUILD_NUMBER: u64 = match option_env!("ABCD_BUILD_NUMBER") {
    Some(s) => match parse_u64(s) {
        Some(n) => n,
        None => 0,
    },
    None => 0,
};

/// Build timestamp in ISO 8601 format
pub const BUILD_TIMESTAMP: &str = match option_env!("ABCD_BUILD_TIMESTAMP") {
    Some(s) => s,
    None => "unknown",
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// `str::parse` is not const
const fn parse_u64(s: &str) -> Option<u64> {
    let bytes = s.as_bytes();
    if bytes.is_empty() {
        return None;
    }
    let mut result: u64 = 0;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if !b.is_ascii_digit() {
            return None;
        }
        result = result * 10 + (b - b'0') as u64;
        i += 1;
    }
    Some(result)
}

#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    pub version: &'static str,
    pub build_number: u64,
    pub build_timestamp: &'static str,
    /// Version of the dataset compiled into this binary
    pub builtin_reference: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            version: VERSION,
            build_number: BUILD_NUMBER,
            build_timestamp: BUILD_TIMESTAMP,
            builtin_reference: BUILTIN_VERSION,
        }
    }
}

fn banner_lines(info: &BuildInfo, store: &ReferenceStore) -> Vec<String> {
    let data = store.snapshot();
    let coverage = match data.age_coverage() {
        Some((min, max)) => format!("ages {}-{}", min, max),
        None => "no bands".to_string(),
    };
    vec![
        "  ABCD Nutritional Reference Engine".to_string(),
        format!("  Version: {} | Build: {}", info.version, info.build_number),
        format!("  Compiled: {} | Built-in data: {}", info.build_timestamp, info.builtin_reference),
        format!("  Reference: {} ({}, {})", data.version, store.source(), coverage),
        format!("  Default sport: {}", data.default_sport),
    ]
}

/// Print the startup banner to stderr; stdout carries the MCP protocol
pub fn print_startup_banner(store: &ReferenceStore) {
    eprintln!("===============================================");
    for line in banner_lines(&BuildInfo::current(), store) {
        eprintln!("{}", line);
    }
    eprintln!("===============================================");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_u64() {
        assert_eq!(parse_u64("42"), Some(42));
        assert_eq!(parse_u64("4x2"), None);
        assert_eq!(parse_u64(""), None);
    }

    #[test]
    fn test_current_uses_package_metadata() {
        let info = BuildInfo::current();
        assert_eq!(info.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(info.builtin_reference, BUILTIN_VERSION);
    }

    #[test]
    fn test_banner_names_published_reference() {
        let store = crate::config::EngineConfig {
            reference_path: None,
            default_sport: Some("ciclismo".to_string()),
        }
        .build_store()
        .unwrap();
        let lines = banner_lines(&BuildInfo::current(), &store);
        assert!(lines.contains(&format!("  Reference: {} (builtin, ages 5-18)", BUILTIN_VERSION)));
        assert!(lines.contains(&"  Default sport: ciclismo".to_string()));
    }
}
