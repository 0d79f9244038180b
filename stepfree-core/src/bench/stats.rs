//! Descriptive statistics over timing samples

use itertools::{Itertools, MinMaxResult};
use serde::Serialize;

/// Bins used for the 95th percentile (cut point 19 of 20)
const P95_BINS: usize = 20;
/// Bins used for the 99th percentile (cut point 99 of 100)
const P99_BINS: usize = 100;

/// Summary of repeated wall-clock timings, in milliseconds
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimingStats {
    pub mean_ms: f64,
    pub median_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
    /// Sample standard deviation, 0 with fewer than two samples
    pub std_dev_ms: f64,
    pub p95_ms: f64,
    pub p99_ms: f64,
}

impl TimingStats {
    /// All zero for an empty sample
    pub fn from_samples(samples: &[f64]) -> Self {
        if samples.is_empty() {
            return Self::default();
        }

        let mut sorted = samples.to_vec();
        sorted.sort_by(f64::total_cmp);
        let (min_ms, max_ms) = min_max(&sorted);

        Self {
            mean_ms: mean(&sorted),
            median_ms: median_sorted(&sorted),
            min_ms,
            max_ms,
            std_dev_ms: sample_std_dev(&sorted),
            p95_ms: nearest_rank_cut(&sorted, P95_BINS - 1, P95_BINS),
            p99_ms: nearest_rank_cut(&sorted, P99_BINS - 1, P99_BINS),
        }
    }
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

pub fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    median_sorted(&sorted)
}

fn median_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    match n {
        0 => 0.0,
        _ if n % 2 == 1 => sorted[n / 2],
        _ => (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0,
    }
}

/// Sample (n - 1) standard deviation, 0 with fewer than two values
pub fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance =
        values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

pub fn min_max(values: &[f64]) -> (f64, f64) {
    match values.iter().copied().minmax_by(f64::total_cmp) {
        MinMaxResult::NoElements => (0.0, 0.0),
        MinMaxResult::OneElement(v) => (v, v),
        MinMaxResult::MinMax(min, max) => (min, max),
    }
}

/// `cut`-th of `bins - 1` cut points by nearest rank over sorted values.
///
/// Needs at least `bins` values for that resolution; smaller samples fall
/// back to the maximum.
pub fn nearest_rank_cut(sorted: &[f64], cut: usize, bins: usize) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return 0.0;
    }
    if n < bins {
        return sorted[n - 1];
    }
    // ceil(cut * n / bins), integer arithmetic to stay exact
    let rank = (cut * n).div_ceil(bins).clamp(1, n);
    sorted[rank - 1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sample_is_all_zero() {
        assert_eq!(TimingStats::from_samples(&[]), TimingStats::default());
    }

    #[test]
    fn single_sample() {
        let stats = TimingStats::from_samples(&[4.0]);
        assert_eq!(stats.mean_ms, 4.0);
        assert_eq!(stats.median_ms, 4.0);
        assert_eq!(stats.std_dev_ms, 0.0);
        assert_eq!(stats.p95_ms, 4.0);
        assert_eq!(stats.p99_ms, 4.0);
    }

    #[test]
    fn basic_moments() {
        let stats = TimingStats::from_samples(&[4.0, 1.0, 3.0, 2.0]);
        assert_eq!(stats.mean_ms, 2.5);
        assert_eq!(stats.median_ms, 2.5);
        assert_eq!(stats.min_ms, 1.0);
        assert_eq!(stats.max_ms, 4.0);
        assert!((stats.std_dev_ms - 1.290_994_448_735_805_6).abs() < 1e-12);
    }

    #[test]
    fn p95_of_twenty_identical_values() {
        let stats = TimingStats::from_samples(&[0.75; 20]);
        assert_eq!(stats.p95_ms, 0.75);
        // 20 samples are not enough for percentile 99
        assert_eq!(stats.p99_ms, 0.75);
    }

    #[test]
    fn p95_falls_back_to_max_below_twenty_samples() {
        let samples: Vec<f64> = (1..=19).map(f64::from).collect();
        let stats = TimingStats::from_samples(&samples);
        assert_eq!(stats.p95_ms, 19.0);
    }

    #[test]
    fn p95_nearest_rank_with_enough_samples() {
        let samples: Vec<f64> = (1..=20).map(f64::from).collect();
        let stats = TimingStats::from_samples(&samples);
        assert_eq!(stats.p95_ms, 19.0);
        assert_eq!(stats.p99_ms, 20.0);

        let hundred: Vec<f64> = (1..=100).rev().map(f64::from).collect();
        let stats = TimingStats::from_samples(&hundred);
        assert_eq!(stats.p95_ms, 95.0);
        assert_eq!(stats.p99_ms, 99.0);
    }
}
