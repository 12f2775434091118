//! Growth percentile tables
//!
//! Height and weight percentile cut-points by gender and whole year of age.
//! Coverage is sparse: the built-in table lists even ages from 6 to 18.

use serde::{Deserialize, Serialize};

use crate::models::{Gender, Metric};

/// Percentile labels in ascending order, plus the open top bucket
pub const PERCENTILE_STEPS: [u8; 7] = [5, 10, 25, 50, 75, 90, 95];
/// Percentile returned when a value exceeds every cut-point
pub const TOP_PERCENTILE: u8 = 97;

/// Growth metric covered by the percentile tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrowthMetric {
    Height,
    Weight,
}

impl GrowthMetric {
    pub fn as_str(&self) -> &'static str {
        match self {
            GrowthMetric::Height => "height",
            GrowthMetric::Weight => "weight",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Metric::from_str(s).and_then(Self::from_metric)
    }

    pub fn from_metric(metric: Metric) -> Option<Self> {
        match metric {
            Metric::Height => Some(GrowthMetric::Height),
            Metric::Weight => Some(GrowthMetric::Weight),
            _ => None,
        }
    }

    pub fn metric(&self) -> Metric {
        match self {
            GrowthMetric::Height => Metric::Height,
            GrowthMetric::Weight => Metric::Weight,
        }
    }
}

/// Cut-points for the 5th through 95th percentiles
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentileCutPoints {
    pub p5: f64,
    pub p10: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub p90: f64,
    pub p95: f64,
}

impl PercentileCutPoints {
    pub const fn from_array(v: [f64; 7]) -> Self {
        Self {
            p5: v[0],
            p10: v[1],
            p25: v[2],
            p50: v[3],
            p75: v[4],
            p90: v[5],
            p95: v[6],
        }
    }

    pub fn values(&self) -> [f64; 7] {
        [self.p5, self.p10, self.p25, self.p50, self.p75, self.p90, self.p95]
    }

    /// (percentile, cut-point) pairs in ascending order
    pub fn steps(&self) -> impl Iterator<Item = (u8, f64)> {
        PERCENTILE_STEPS.into_iter().zip(self.values())
    }

    pub fn is_non_decreasing(&self) -> bool {
        let v = self.values();
        v.iter().all(|x| x.is_finite()) && v.windows(2).all(|w| w[0] <= w[1])
    }
}

/// One row of the growth table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthEntry {
    pub metric: GrowthMetric,
    pub gender: Gender,
    pub age: u32,
    pub cut_points: PercentileCutPoints,
}

/// All growth rows, searched by (metric, gender, age)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GrowthTable {
    entries: Vec<GrowthEntry>,
}

impl GrowthTable {
    pub fn new(entries: Vec<GrowthEntry>) -> Self {
        Self { entries }
    }

    pub fn lookup(&self, metric: GrowthMetric, gender: Gender, age: u32) -> Option<&PercentileCutPoints> {
        self.entries
            .iter()
            .find(|e| e.metric == metric && e.gender == gender && e.age == age)
            .map(|e| &e.cut_points)
    }

    pub fn entries(&self) -> &[GrowthEntry] {
        &self.entries
    }

    /// Ages listed for a metric and gender, ascending
    pub fn ages(&self, metric: GrowthMetric, gender: Gender) -> Vec<u32> {
        let mut ages: Vec<u32> = self
            .entries
            .iter()
            .filter(|e| e.metric == metric && e.gender == gender)
            .map(|e| e.age)
            .collect();
        ages.sort_unstable();
        ages
    }
}

// ============================================================================
// Built-in dataset
// ============================================================================

type Row = (u32, [f64; 7]);

const HEIGHT_MALE: [Row; 7] = [
    (6, [107.0, 109.0, 112.5, 116.0, 119.5, 123.0, 125.0]),
    (8, [118.0, 120.0, 124.0, 128.0, 131.5, 135.0, 137.5]),
    (10, [127.0, 130.0, 134.0, 138.5, 143.0, 147.0, 149.5]),
    (12, [137.0, 140.0, 144.5, 149.5, 155.0, 160.0, 163.0]),
    (14, [150.0, 153.0, 158.5, 164.0, 169.5, 174.0, 176.5]),
    (16, [162.0, 164.5, 169.0, 173.5, 178.0, 182.0, 184.5]),
    (18, [165.0, 167.5, 171.5, 176.0, 180.5, 184.5, 187.0]),
];

const HEIGHT_FEMALE: [Row; 7] = [
    (6, [106.0, 108.0, 111.5, 115.0, 118.5, 122.0, 124.0]),
    (8, [117.0, 119.5, 123.0, 127.0, 131.0, 134.5, 137.0]),
    (10, [127.0, 129.5, 133.5, 138.0, 142.5, 146.5, 149.0]),
    (12, [139.0, 142.0, 146.5, 151.5, 156.0, 160.0, 162.5]),
    (14, [149.0, 151.5, 155.5, 160.0, 164.5, 168.5, 171.0]),
    (16, [151.0, 153.0, 157.5, 162.0, 166.5, 170.5, 173.0]),
    (18, [152.0, 154.0, 158.0, 163.0, 167.0, 171.0, 173.5]),
];

const WEIGHT_MALE: [Row; 7] = [
    (6, [17.5, 18.3, 19.6, 21.0, 22.8, 25.0, 26.5]),
    (8, [21.5, 22.5, 24.3, 26.5, 29.3, 33.0, 35.7]),
    (10, [26.0, 27.3, 29.8, 33.0, 37.5, 43.0, 47.0]),
    (12, [31.5, 33.3, 36.8, 41.5, 47.5, 55.0, 60.0]),
    (14, [39.5, 42.0, 46.5, 52.0, 59.0, 67.5, 73.0]),
    (16, [48.5, 51.0, 55.5, 61.0, 68.5, 77.5, 84.0]),
    (18, [54.0, 56.5, 61.0, 67.0, 74.5, 84.5, 92.0]),
];

const WEIGHT_FEMALE: [Row; 7] = [
    (6, [16.8, 17.6, 19.0, 20.5, 22.3, 24.8, 26.5]),
    (8, [20.5, 21.6, 23.5, 26.0, 29.0, 33.0, 36.0]),
    (10, [25.5, 27.0, 29.8, 33.0, 38.0, 44.0, 48.5]),
    (12, [32.0, 34.0, 37.8, 42.0, 48.0, 55.0, 60.0]),
    (14, [39.5, 41.8, 45.5, 50.0, 56.0, 63.5, 69.0]),
    (16, [43.5, 45.5, 49.5, 54.0, 60.5, 68.5, 75.0]),
    (18, [45.5, 47.5, 51.5, 56.0, 62.5, 71.0, 78.0]),
];

/// The built-in growth table
pub fn builtin_growth_table() -> GrowthTable {
    let sets: [(GrowthMetric, Gender, &[Row]); 4] = [
        (GrowthMetric::Height, Gender::Male, &HEIGHT_MALE),
        (GrowthMetric::Height, Gender::Female, &HEIGHT_FEMALE),
        (GrowthMetric::Weight, Gender::Male, &WEIGHT_MALE),
        (GrowthMetric::Weight, Gender::Female, &WEIGHT_FEMALE),
    ];

    let entries = sets
        .iter()
        .flat_map(|(metric, gender, rows)| {
            rows.iter().map(move |(age, values)| GrowthEntry {
                metric: *metric,
                gender: *gender,
                age: *age,
                cut_points: PercentileCutPoints::from_array(*values),
            })
        })
        .collect();

    GrowthTable::new(entries)
}
