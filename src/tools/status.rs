//! ABCD Status Tool
//!
//! Runtime status of the service and the assessment workflow guide.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::reference::{ReferenceSource, ReferenceStore};

/// Assessment workflow instructions for AI assistants
pub const ASSESSMENT_INSTRUCTIONS: &str = r#"
# ABCD Assessment Instructions

The ABCD method evaluates a youth athlete (ages 5 to 18) across four
domains: Anthropometric, Biochemical, Clinical and Dietetic. These tools
classify each measurement against age and gender reference bands and
combine the results into one nutritional status.

---

## Quick Path: Full Assessment

Call `assess_athlete` with everything you have:

- `id`, `age`, `gender` (male/female, masculino/femenino)
- `weight_kg`, `height_cm`, optional `body_fat_percent`
- `sport` (e.g. "futbol", "natación"); omitted means the default sport
- `biochemistry`: map of analyte to value, e.g.
  `{"hemoglobina": 13.2, "ferritina": 35, "glucosa": 88}`
- Dietary intake averages: `energy_kcal`, `protein_g`, `lipids_g`,
  `carbs_g`, `fiber_g`
- `base_calories`: base caloric need in kcal/day, if known
- `clinical_notes`: free text, returned untouched

The result lists every classification, height and weight percentiles,
per-domain status, the overall status with the metrics driving it, and
sport-adjusted targets when `base_calories` was given.

---

## Statuses

| Status        | Meaning                                  |
|---------------|------------------------------------------|
| `normal`      | Inside the reference range               |
| `low`/`high`  | Outside the range (warning)              |
| `warning`     | BMI in the overweight band               |
| `deficient`   | BMI below the underweight threshold      |
| `excess`      | BMI in the obese band                    |
| `unavailable` | No reference band for this age or metric |

Overall status is `normal`, `warning` or `danger`:

- Any `deficient` or `excess` is **danger**
- `unavailable` BMI, hemoglobin or glucose is **danger**
- Any `low`, `high` or `warning` is **warning**
- Other `unavailable` results are ignored

---

## Single Measurements

- `classify_measurement`: one metric (bmi, body_fat, hemoglobina,
  ferritina, hierro, vitamina_d, glucosa, hematocrito, calories_per_kg,
  protein_per_kg, carb_percent, fat_percent, talla, peso)
- `estimate_percentile`: height (cm) or weight (kg) growth percentile.
  Ages without a table entry return 50 with `table_entry_found: false`
- `aggregate_status`: combine statuses you already have

## Sport Targets

`derive_sport_targets` scales base calories by the sport multiplier and
body weight by the sport's protein and carbohydrate ranges. An unknown
sport uses the default profile and reports `fallback: true`. Use
`list_sports` to see the known keys.

## Food Data

- `normalize_food_category`: map a source category label and food name
  to the nine food groups
- `import_food_csv`: import a food composition sheet. Blank or invalid
  numbers become 0 and are counted, a zero net weight means a 100 g
  portion, and rows without a food name are skipped

## Reference Data

- `get_reference_band`: the ranges used for an age and gender
- `reload_reference_data`: re-read the reference file (or a new path).
  An invalid file is rejected and the current data stays in use
"#;

/// Service status information
#[derive(Debug, Serialize)]
pub struct AbcdStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,
    pub builtin_reference_version: &'static str,
    /// Reference data information
    pub reference_version: String,
    pub reference_source: ReferenceSource,
    pub reference_age_range: Option<(u32, u32)>,
    pub sport_count: usize,
    pub default_sport: String,
    /// Process information
    pub started_at: String,
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    started_at: DateTime<Utc>,
}

impl StatusTracker {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            started_at: Utc::now(),
        }
    }

    pub fn get_status(&self, store: &ReferenceStore) -> AbcdStatus {
        let build_info = BuildInfo::current();
        let data = store.snapshot();

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));
        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        AbcdStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            builtin_reference_version: build_info.builtin_reference,
            reference_version: data.version.clone(),
            reference_source: store.source(),
            reference_age_range: data.age_coverage(),
            sport_count: data.sports.len(),
            default_sport: data.default_sport.clone(),
            started_at: self.started_at.to_rfc3339(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}

impl Default for StatusTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_reports_reference_data() {
        let store = ReferenceStore::builtin().unwrap();
        let status = StatusTracker::new().get_status(&store);
        assert_eq!(status.reference_version, crate::reference::BUILTIN_VERSION);
        assert_eq!(status.reference_source, ReferenceSource::Builtin);
        assert_eq!(status.reference_age_range, Some((5, 18)));
        assert_eq!(status.default_sport, "futbol");
        assert_eq!(status.process_id, std::process::id());
    }

    #[test]
    fn test_instructions_name_every_tool() {
        for tool in [
            "assess_athlete",
            "classify_measurement",
            "estimate_percentile",
            "aggregate_status",
            "derive_sport_targets",
            "list_sports",
            "normalize_food_category",
            "import_food_csv",
            "get_reference_band",
            "reload_reference_data",
        ] {
            assert!(ASSESSMENT_INSTRUCTIONS.contains(tool), "{}", tool);
        }
    }
}
