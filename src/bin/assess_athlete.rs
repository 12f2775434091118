//! Utility to assess athletes from a JSON file
//!
//! Usage: assess_athlete <athletes.json>
//!
//! The file holds one athlete record or an array of them. Assessments are
//! printed to stdout as JSON.

use abcd::config::EngineConfig;
use abcd::engine::assess;
use abcd::models::Athlete;

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum AthleteFile {
    Many(Vec<Athlete>),
    One(Box<Athlete>),
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .ok_or("Usage: assess_athlete <athletes.json>")?;

    let store = EngineConfig::from_env().build_store()?;
    let data = store.snapshot();

    let text = std::fs::read_to_string(&path)?;
    let file: AthleteFile = serde_json::from_str(&text)?;
    let athletes = match file {
        AthleteFile::Many(athletes) => athletes,
        AthleteFile::One(athlete) => vec![*athlete],
    };
    eprintln!("Assessing {} athlete(s) with reference {}", athletes.len(), data.version);

    let assessments: Vec<_> = athletes.iter().map(|a| assess(a, &data)).collect();
    println!("{}", serde_json::to_string_pretty(&assessments)?);

    Ok(())
}
