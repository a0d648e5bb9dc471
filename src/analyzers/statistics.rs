//! Descriptive statistics over a fully populated numeric column.
//!
//! Conventions follow the usual dataframe defaults: sample (n - 1)
//! variance and covariance, linearly interpolated quantiles, and the
//! smallest value when several share the highest frequency.

use serde::Serialize;
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnStatistics {
    pub variable: String,
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub variance: f64,
    pub min: f64,
    pub max: f64,
    pub mode: Option<f64>,
    pub percentile_25: f64,
    pub percentile_75: f64,
}

impl ColumnStatistics {
    pub fn from_values(variable: impl Into<String>, values: &[f64]) -> Self {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let variance = sample_variance(values);

        Self {
            variable: variable.into(),
            count: values.len(),
            mean: mean(values),
            median: quantile(&sorted, 0.5),
            std_dev: variance.sqrt(),
            variance,
            min: sorted.first().copied().unwrap_or(f64::NAN),
            max: sorted.last().copied().unwrap_or(f64::NAN),
            mode: mode(&sorted),
            percentile_25: quantile(&sorted, 0.25),
            percentile_75: quantile(&sorted, 0.75),
        }
    }
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// NaN for fewer than two values
pub fn sample_variance(values: &[f64]) -> f64 {
    covariance(values, values)
}

/// Sample covariance of two equally long columns; NaN for fewer than two pairs
pub fn covariance(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n < 2 {
        return f64::NAN;
    }

    let mean_x = mean(&x[..n]);
    let mean_y = mean(&y[..n]);
    let sum: f64 = x[..n]
        .iter()
        .zip(&y[..n])
        .map(|(a, b)| (a - mean_x) * (b - mean_y))
        .sum();

    sum / (n - 1) as f64
}

/// Pearson correlation; NaN when either column is constant
pub fn correlation(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    let denominator = (sample_variance(&x[..n]) * sample_variance(&y[..n])).sqrt();
    if denominator == 0.0 {
        return f64::NAN;
    }
    covariance(x, y) / denominator
}

/// Linear interpolation between closest ranks. `sorted` must be ascending.
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }

    let position = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;

    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

/// Most frequent value, smallest first on ties. `sorted` must be ascending.
pub fn mode(sorted: &[f64]) -> Option<f64> {
    let mut best: Option<(f64, usize)> = None;
    let mut index = 0;

    while index < sorted.len() {
        let value = sorted[index];
        let run = sorted[index..]
            .iter()
            .take_while(|v| v.total_cmp(&value) == Ordering::Equal)
            .count();

        if best.map_or(true, |(_, count)| run > count) {
            best = Some((value, run));
        }
        index += run;
    }

    best.map(|(value, _)| value)
}
