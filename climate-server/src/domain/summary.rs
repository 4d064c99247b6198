//! Temperature aggregates over a date range.

/// Minimum, maximum and mean temperature over a set of readings.
///
/// Every field is `None` when no readings matched. Aggregating an empty
/// range is not an error.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TemperatureSummary {
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub average: Option<f64>,
}

impl TemperatureSummary {
    /// Aggregate a sequence of temperatures.
    pub fn from_temperatures(temps: impl IntoIterator<Item = f64>) -> Self {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut minimum: Option<f64> = None;
        let mut maximum: Option<f64> = None;

        for t in temps {
            count += 1;
            sum += t;
            minimum = Some(minimum.map_or(t, |m| m.min(t)));
            maximum = Some(maximum.map_or(t, |m| m.max(t)));
        }

        Self {
            minimum,
            maximum,
            average: (count > 0).then(|| sum / count as f64),
        }
    }

    /// The average rounded to two decimal places; `None` stays `None`.
    pub fn rounded_average(&self) -> Option<f64> {
        self.average.map(round_2dp)
    }
}

/// Round to two decimal places.
///
/// Rounds the exact binary value, so ties go to the even digit
/// (73.125 -> 73.12, 2.675 -> 2.67).
fn round_2dp(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}
