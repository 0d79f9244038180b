//! Per-pair comparison of Dijkstra and A* measurements

use serde::Serialize;

use super::measurement::Measurement;
use super::sampling::DistanceCategory;

/// `baseline / candidate`, 0 when the candidate time is 0
pub fn speedup(baseline_ms: f64, candidate_ms: f64) -> f64 {
    if candidate_ms > 0.0 {
        baseline_ms / candidate_ms
    } else {
        0.0
    }
}

/// Share of Dijkstra's settled nodes that A* did not need, in percent.
/// 0 when Dijkstra settled nothing.
pub fn exploration_savings(dijkstra_explored: usize, astar_explored: usize) -> f64 {
    if dijkstra_explored == 0 {
        0.0
    } else {
        100.0 * (1.0 - astar_explored as f64 / dijkstra_explored as f64)
    }
}

/// One accepted origin/destination trial
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRecord {
    pub origin: String,
    pub destination: String,
    pub straight_line_m: f64,
    pub category: DistanceCategory,
    pub dijkstra: Measurement,
    pub astar: Measurement,
    pub speedup_mean: f64,
    pub speedup_median: f64,
    pub exploration_savings_pct: f64,
}

impl ComparisonRecord {
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        straight_line_m: f64,
        dijkstra: Measurement,
        astar: Measurement,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            straight_line_m,
            category: DistanceCategory::from_meters(straight_line_m),
            speedup_mean: speedup(dijkstra.stats.mean_ms, astar.stats.mean_ms),
            speedup_median: speedup(dijkstra.stats.median_ms, astar.stats.median_ms),
            exploration_savings_pct: exploration_savings(dijkstra.explored, astar.explored),
            dijkstra,
            astar,
        }
    }
}

/// Flat, pre-formatted row for tabular export
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub origin: String,
    pub destination: String,
    pub straight_line_m: String,
    pub category: DistanceCategory,
    pub dijkstra_mean_ms: String,
    pub dijkstra_median_ms: String,
    pub dijkstra_std_dev_ms: String,
    pub dijkstra_explored: usize,
    pub astar_mean_ms: String,
    pub astar_median_ms: String,
    pub astar_std_dev_ms: String,
    pub astar_explored: usize,
    pub speedup_mean: String,
    pub speedup_median: String,
    pub exploration_savings_pct: String,
}

impl From<&ComparisonRecord> for ComparisonRow {
    fn from(r: &ComparisonRecord) -> Self {
        Self {
            origin: r.origin.clone(),
            destination: r.destination.clone(),
            straight_line_m: format!("{:.2}", r.straight_line_m),
            category: r.category,
            dijkstra_mean_ms: format!("{:.4}", r.dijkstra.stats.mean_ms),
            dijkstra_median_ms: format!("{:.4}", r.dijkstra.stats.median_ms),
            dijkstra_std_dev_ms: format!("{:.4}", r.dijkstra.stats.std_dev_ms),
            dijkstra_explored: r.dijkstra.explored,
            astar_mean_ms: format!("{:.4}", r.astar.stats.mean_ms),
            astar_median_ms: format!("{:.4}", r.astar.stats.median_ms),
            astar_std_dev_ms: format!("{:.4}", r.astar.stats.std_dev_ms),
            astar_explored: r.astar.explored,
            speedup_mean: format!("{:.2}", r.speedup_mean),
            speedup_median: format!("{:.2}", r.speedup_median),
            exploration_savings_pct: format!("{:.2}", r.exploration_savings_pct),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bench::stats::TimingStats;
    use crate::routing::Algorithm;

    fn measurement(algorithm: Algorithm, mean_ms: f64, median_ms: f64, explored: usize) -> Measurement {
        Measurement {
            algorithm,
            success: true,
            timings_ms: vec![mean_ms],
            stats: TimingStats {
                mean_ms,
                median_ms,
                ..TimingStats::default()
            },
            cost: 100.0,
            point_count: 4,
            explored,
            error: None,
        }
    }

    #[test]
    fn derived_ratios() {
        let record = ComparisonRecord::new(
            "Library",
            "Gym",
            250.0,
            measurement(Algorithm::Dijkstra, 2.0, 1.5, 40),
            measurement(Algorithm::AStar, 0.5, 0.5, 10),
        );
        assert_eq!(record.category, DistanceCategory::Medium);
        assert_eq!(record.speedup_mean, 4.0);
        assert_eq!(record.speedup_median, 3.0);
        assert_eq!(record.exploration_savings_pct, 75.0);
    }

    #[test]
    fn zero_denominators_give_zero() {
        assert_eq!(speedup(3.0, 0.0), 0.0);
        assert_eq!(exploration_savings(0, 5), 0.0);
    }

    #[test]
    fn row_formatting_precision() {
        let record = ComparisonRecord::new(
            "A",
            "B",
            123.456,
            measurement(Algorithm::Dijkstra, 1.234_567, 1.0, 3),
            measurement(Algorithm::AStar, 0.617_283_5, 1.0, 2),
        );
        let row = ComparisonRow::from(&record);
        assert_eq!(row.straight_line_m, "123.46");
        assert_eq!(row.dijkstra_mean_ms, "1.2346");
        assert_eq!(row.speedup_mean, "2.00");
        assert_eq!(row.exploration_savings_pct, "33.33");
    }

    #[test]
    fn structured_record_keeps_every_timing() {
        let record = ComparisonRecord::new(
            "A",
            "B",
            10.0,
            measurement(Algorithm::Dijkstra, 1.0, 1.0, 3),
            measurement(Algorithm::AStar, 1.0, 1.0, 3),
        );
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["dijkstra"]["timings_ms"], serde_json::json!([1.0]));
        assert_eq!(value["astar"]["algorithm"], "astar");
        assert_eq!(value["category"], "short");
    }
}
