//! Dijkstra versus A* benchmark over sampled points of interest.
//!
//! A [`Benchmark`] draws pairs with a seeded [`PairSampler`], discards
//! disconnected ones, times both algorithms with [`measure`] and collects
//! [`ComparisonRecord`]s. [`BenchmarkSummary`] aggregates them per
//! [`DistanceCategory`].

mod comparison;
mod config;
mod harness;
mod measurement;
mod sampling;
mod stats;
mod summary;

pub use crate::model::PoiCatalog;
pub use comparison::{ComparisonRecord, ComparisonRow, exploration_savings, speedup};
pub use config::BenchmarkConfig;
pub use harness::{Benchmark, BenchmarkReport, PairRejection};
pub use measurement::{Measurement, NO_PATH, Timing, measure};
pub use sampling::{
    DistanceCategory, MEDIUM_LIMIT_M, PairSampler, SHORT_LIMIT_M, straight_line_distance,
};
pub use stats::{TimingStats, nearest_rank_cut};
pub use summary::{BenchmarkSummary, CategorySummary, SeriesSummary};
