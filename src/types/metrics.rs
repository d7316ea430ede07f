/// One bar of the dashboard chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartBar {
    pub label: &'static str,
    pub value: f64,
}

/// Figures derived from a series snapshot and an operator weight.
///
/// Stateless: recomputed in full on every request, never cached.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsResult {
    /// Distance covered, metres.
    pub distance: f64,
    /// Aggregate speed, m/s.
    pub speed: f64,
    /// Caloric expenditure, Cal.
    pub caloric_expenditure: f64,
    /// Caloric expenditure per minute, Cal/min.
    pub calories_per_minute: f64,
    /// Total expenditure over the whole series, Cal.
    pub total_calories: f64,
    /// Number of samples the figures were derived from.
    pub sample_count: usize,
}

impl MetricsResult {
    pub fn zero() -> Self {
        Self {
            distance: 0.0,
            speed: 0.0,
            caloric_expenditure: 0.0,
            calories_per_minute: 0.0,
            total_calories: 0.0,
            sample_count: 0,
        }
    }

    /// Bar-chart dataset mirroring the four headline scalars.
    pub fn chart_bars(&self) -> Vec<ChartBar> {
        vec![
            ChartBar { label: "Distance", value: self.distance },
            ChartBar { label: "Speed", value: self.speed },
            ChartBar { label: "Calories/min", value: self.calories_per_minute },
            ChartBar { label: "Total calories", value: self.total_calories },
        ]
    }
}
