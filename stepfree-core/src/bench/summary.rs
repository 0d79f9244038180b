//! Aggregate statistics over accepted comparison records

use std::fmt;

use itertools::Itertools;
use serde::Serialize;

use super::comparison::ComparisonRecord;
use super::sampling::DistanceCategory;
use super::stats::{mean, median, min_max, sample_std_dev};

/// Descriptive statistics of one series of per-pair values
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeriesSummary {
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub std_dev: f64,
}

impl SeriesSummary {
    pub fn from_values(values: &[f64]) -> Self {
        let (min, max) = min_max(values);
        Self {
            mean: mean(values),
            median: median(values),
            min,
            max,
            std_dev: sample_std_dev(values),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummary {
    pub category: DistanceCategory,
    pub count: usize,
    pub mean_speedup: f64,
    pub mean_savings_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkSummary {
    pub pairs: usize,
    /// Per-pair mean Dijkstra times
    pub dijkstra_ms: SeriesSummary,
    /// Per-pair mean A* times
    pub astar_ms: SeriesSummary,
    /// Per-pair mean-time speedups
    pub speedup: SeriesSummary,
    pub mean_explored_dijkstra: f64,
    pub mean_explored_astar: f64,
    pub mean_savings_pct: f64,
    /// Non-empty categories, short to long
    pub categories: Vec<CategorySummary>,
}

impl BenchmarkSummary {
    /// `None` when there is nothing to summarize
    pub fn from_records(records: &[ComparisonRecord]) -> Option<Self> {
        if records.is_empty() {
            return None;
        }

        let series = |f: fn(&ComparisonRecord) -> f64| records.iter().map(f).collect::<Vec<_>>();

        let by_category = records.iter().into_group_map_by(|r| r.category);
        let categories = DistanceCategory::ALL
            .into_iter()
            .filter_map(|category| {
                let group = by_category.get(&category)?;
                let speedups: Vec<f64> = group.iter().map(|r| r.speedup_mean).collect();
                let savings: Vec<f64> = group.iter().map(|r| r.exploration_savings_pct).collect();
                Some(CategorySummary {
                    category,
                    count: group.len(),
                    mean_speedup: mean(&speedups),
                    mean_savings_pct: mean(&savings),
                })
            })
            .collect();

        Some(Self {
            pairs: records.len(),
            dijkstra_ms: SeriesSummary::from_values(&series(|r| r.dijkstra.stats.mean_ms)),
            astar_ms: SeriesSummary::from_values(&series(|r| r.astar.stats.mean_ms)),
            speedup: SeriesSummary::from_values(&series(|r| r.speedup_mean)),
            mean_explored_dijkstra: mean(&series(|r| r.dijkstra.explored as f64)),
            mean_explored_astar: mean(&series(|r| r.astar.explored as f64)),
            mean_savings_pct: mean(&series(|r| r.exploration_savings_pct)),
            categories,
        })
    }
}

impl fmt::Display for BenchmarkSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(70);
        writeln!(f, "{}", "=".repeat(70))?;
        writeln!(f, "BENCHMARK REPORT ({} pairs)", self.pairs)?;
        writeln!(f, "{}", "=".repeat(70))?;

        writeln!(f, "\nRUN TIME (ms)")?;
        writeln!(f, "{rule}")?;
        writeln!(f, "{:20} {:>15} {:>15} {:>15}", "", "Dijkstra", "A*", "Speedup")?;
        writeln!(f, "{rule}")?;
        let rows: [(&str, fn(&SeriesSummary) -> f64); 5] = [
            ("Mean:", |s| s.mean),
            ("Median:", |s| s.median),
            ("Min:", |s| s.min),
            ("Max:", |s| s.max),
            ("Std dev:", |s| s.std_dev),
        ];
        for (label, pick) in rows {
            writeln!(
                f,
                "{:20} {:>15.4} {:>15.4} {:>14.2}x",
                label,
                pick(&self.dijkstra_ms),
                pick(&self.astar_ms),
                pick(&self.speedup)
            )?;
        }

        writeln!(f, "\nEXPLORED NODES")?;
        writeln!(f, "{rule}")?;
        writeln!(f, "{:30} {:>10.1} nodes", "Mean Dijkstra:", self.mean_explored_dijkstra)?;
        writeln!(f, "{:30} {:>10.1} nodes", "Mean A*:", self.mean_explored_astar)?;
        writeln!(f, "{:30} {:>10.2}%", "Mean savings:", self.mean_savings_pct)?;

        writeln!(f, "\nBY DISTANCE CATEGORY")?;
        writeln!(f, "{rule}")?;
        for c in &self.categories {
            writeln!(f, "\n{} (n={}):", c.category.label().to_uppercase(), c.count)?;
            writeln!(f, "  Mean speedup: {:.2}x", c.mean_speedup)?;
            writeln!(f, "  Node savings: {:.2}%", c.mean_savings_pct)?;
        }
        write!(f, "\n{}", "=".repeat(70))
    }
}
