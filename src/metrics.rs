use crate::types::{MetricsResult, Sample};

/// Calories burned per unit speed per kilogram, from the original
/// expenditure formula.
const CALORIC_FACTOR: f64 = 0.0175;

/// Derives the dashboard figures from a series snapshot and the operator's
/// weight. Fully stateless; the formulas are fixed for compatibility with
/// the deployed gateway tooling.
///
/// Only the x and y channels enter the scalar formulas; z is carried in the
/// series but unused here. That quirk is part of the defined metric, not a
/// bug to fix.
///
/// `speed` is the magnitude of the summed planar acceleration vector — an
/// aggregate over the whole series, not a kinematic per-sample speed.
pub fn compute(series: &[Sample], weight_kg: f64) -> MetricsResult {
    if series.is_empty() {
        return MetricsResult::zero();
    }

    let count = series.len();
    let sum_squares: f64 = series
        .iter()
        .map(|s| {
            let ax = s.x.abs();
            let ay = s.y.abs();
            ax * ax + ay * ay
        })
        .sum();

    let speed = sum_squares.sqrt();
    let caloric_expenditure = speed * weight_kg * CALORIC_FACTOR;
    let calories_per_minute = caloric_expenditure * 60.0;
    let distance = speed * count as f64;
    // one sample per minute by definition of the metric
    let total_minutes = count as f64;
    let total_calories = calories_per_minute * total_minutes;

    MetricsResult {
        distance,
        speed,
        caloric_expenditure,
        calories_per_minute,
        total_calories,
        sample_count: count,
    }
}
