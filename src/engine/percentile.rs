//! Growth percentile estimation
//!
//! A stepwise lookup against the growth table: the first cut-point the value
//! does not exceed names the percentile.

use crate::models::Gender;
use crate::reference::{GrowthMetric, PercentileCutPoints, ReferenceData, TOP_PERCENTILE};

/// Percentile reported for ages the growth table does not list
pub const FALLBACK_PERCENTILE: u8 = 50;

/// Walk the cut-points in ascending order. A value equal to a cut-point
/// takes that cut-point's percentile; above all of them is 97.
pub fn percentile_from_cut_points(value: f64, cut_points: &PercentileCutPoints) -> u8 {
    if value.is_nan() {
        return FALLBACK_PERCENTILE;
    }
    cut_points
        .steps()
        .find(|(_, cut)| value <= *cut)
        .map(|(percentile, _)| percentile)
        .unwrap_or(TOP_PERCENTILE)
}

/// Estimate the population percentile of a height (cm) or weight (kg).
///
/// Coverage of the growth table is sparse on purpose; an unlisted age
/// returns 50 rather than an error.
pub fn estimate_percentile(
    data: &ReferenceData,
    value: f64,
    age: u32,
    gender: Gender,
    metric: GrowthMetric,
) -> u8 {
    match data.cut_points(metric, gender, age) {
        Some(cut_points) => percentile_from_cut_points(value, cut_points),
        None => {
            tracing::debug!(
                metric = metric.as_str(),
                %gender,
                age,
                "No growth table entry, using fallback percentile"
            );
            FALLBACK_PERCENTILE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_scenario_sixteen_year_old_female_height() {
        let data = ReferenceData::builtin();
        let p = estimate_percentile(&data, 162.0, 16, Gender::Female, GrowthMetric::Height);
        assert_eq!(p, 50);
    }

    #[test]
    fn test_equal_to_cut_point_takes_that_percentile() {
        let cuts = PercentileCutPoints::from_array([10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0]);
        assert_eq!(percentile_from_cut_points(10.0, &cuts), 5);
        assert_eq!(percentile_from_cut_points(10.1, &cuts), 10);
        assert_eq!(percentile_from_cut_points(30.0, &cuts), 25);
        assert_eq!(percentile_from_cut_points(70.0, &cuts), 95);
        assert_eq!(percentile_from_cut_points(70.1, &cuts), 97);
        assert_eq!(percentile_from_cut_points(-5.0, &cuts), 5);
    }

    #[test]
    fn test_unlisted_age_falls_back_to_fifty() {
        let data = ReferenceData::builtin();
        for age in [3, 7, 15, 21] {
            assert_eq!(
                estimate_percentile(&data, 500.0, age, Gender::Male, GrowthMetric::Weight),
                FALLBACK_PERCENTILE
            );
        }
    }

    #[test]
    fn test_weight_percentiles() {
        let data = ReferenceData::builtin();
        assert_eq!(estimate_percentile(&data, 40.0, 12, Gender::Male, GrowthMetric::Weight), 50);
        assert_eq!(estimate_percentile(&data, 58.0, 12, Gender::Male, GrowthMetric::Weight), 95);
        assert_eq!(estimate_percentile(&data, 75.0, 12, Gender::Male, GrowthMetric::Weight), 97);
    }

    #[test]
    fn test_plateau_cut_points_take_lowest_label() {
        let cuts = PercentileCutPoints::from_array([10.0, 20.0, 20.0, 20.0, 50.0, 60.0, 70.0]);
        assert_eq!(percentile_from_cut_points(20.0, &cuts), 10);
    }

    proptest! {
        #[test]
        fn prop_percentile_is_monotonic(a in 90.0f64..200.0, b in 90.0f64..200.0, age_idx in 0usize..7) {
            let data = ReferenceData::builtin();
            let age = [6, 8, 10, 12, 14, 16, 18][age_idx];
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let p_lo = estimate_percentile(&data, lo, age, Gender::Female, GrowthMetric::Height);
            let p_hi = estimate_percentile(&data, hi, age, Gender::Female, GrowthMetric::Height);
            prop_assert!(p_lo <= p_hi);
        }

        #[test]
        fn prop_percentile_is_idempotent_and_in_label_set(v in 0.0f64..250.0, age in 0u32..25) {
            let data = ReferenceData::builtin();
            let first = estimate_percentile(&data, v, age, Gender::Male, GrowthMetric::Height);
            let second = estimate_percentile(&data, v, age, Gender::Male, GrowthMetric::Height);
            prop_assert_eq!(first, second);
            prop_assert!([5u8, 10, 25, 50, 75, 90, 95, 97].contains(&first));
        }
    }
}
