//! Utility to export the reference dataset as JSON
//!
//! Usage: export_reference [output.json]
//!
//! Writes the configured dataset (ABCD_REFERENCE_PATH, ABCD_DEFAULT_SPORT)
//! or the built-in one. The output is a starting point for a club-specific
//! reference file.

use abcd::config::EngineConfig;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let store = EngineConfig::from_env().build_store()?;
    let data = store.snapshot();
    let json = data.to_json_pretty()?;

    match std::env::args().nth(1) {
        Some(path) => {
            std::fs::write(&path, json)?;
            eprintln!("Reference data {} written to {}", data.version, path);
        }
        None => println!("{}", json),
    }

    Ok(())
}
