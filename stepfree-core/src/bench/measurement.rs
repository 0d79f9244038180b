//! Repeated, timed route computations for one algorithm on one pair

use std::time::Instant;

use geo::Point;
use log::debug;
use serde::{Deserialize, Serialize};

use super::stats::TimingStats;
use crate::model::StreetGraph;
use crate::routing::{Algorithm, HeuristicMode, route_between};

/// Failure reason recorded when a timed run finds no route
pub const NO_PATH: &str = "no path";

/// Warm-up and measured repetition counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timing {
    pub warmup: usize,
    pub repetitions: usize,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            warmup: 3,
            repetitions: 20,
        }
    }
}

/// Outcome of timing one algorithm on one origin/destination pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    pub algorithm: Algorithm,
    pub success: bool,
    /// One entry per timed repetition
    pub timings_ms: Vec<f64>,
    #[serde(flatten)]
    pub stats: TimingStats,
    /// Weighted cost of the route found
    pub cost: f64,
    /// Number of geometry points of the route
    pub point_count: usize,
    pub explored: usize,
    pub error: Option<String>,
}

impl Measurement {
    pub fn failed(algorithm: Algorithm, reason: impl Into<String>) -> Self {
        Self {
            algorithm,
            success: false,
            timings_ms: Vec::new(),
            stats: TimingStats::default(),
            cost: 0.0,
            point_count: 0,
            explored: 0,
            error: Some(reason.into()),
        }
    }
}

/// Time `algorithm` between two coordinates.
///
/// Warm-up runs are discarded. Any timed run without a route marks the whole
/// measurement as failed with zeroed statistics. The exploration count comes
/// from the instrumented search of the last timed run; the search is
/// deterministic, so it is the same for every repetition.
pub fn measure(
    graph: &StreetGraph,
    origin: Point<f64>,
    destination: Point<f64>,
    algorithm: Algorithm,
    mode: HeuristicMode,
    timing: Timing,
) -> Measurement {
    for _ in 0..timing.warmup {
        // Results are discarded, failures surface in the timed runs below
        let _ = route_between(graph, origin, destination, algorithm, mode);
    }

    let mut timings_ms = Vec::with_capacity(timing.repetitions);
    let mut last_route = None;

    for _ in 0..timing.repetitions {
        let start = Instant::now();
        let outcome = route_between(graph, origin, destination, algorithm, mode);
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        match outcome {
            Ok(Some(route)) => {
                timings_ms.push(elapsed_ms);
                last_route = Some(route);
            }
            Ok(None) => return Measurement::failed(algorithm, NO_PATH),
            Err(e) => return Measurement::failed(algorithm, e.to_string()),
        }
    }

    let Some(route) = last_route else {
        return Measurement::failed(algorithm, "no timed repetitions");
    };

    let stats = TimingStats::from_samples(&timings_ms);
    debug!(
        "{algorithm}: mean {:.4} ms over {} runs, {} nodes explored",
        stats.mean_ms,
        timings_ms.len(),
        route.explored
    );

    Measurement {
        algorithm,
        success: true,
        timings_ms,
        stats,
        cost: route.cost,
        point_count: route.points.len(),
        explored: route.explored,
        error: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loading::GraphBuilder;
    use crate::model::{StreetEdge, StreetNode};

    fn graph() -> StreetGraph {
        let mut builder = GraphBuilder::new();
        builder.add_node(StreetNode::new(1, 0.0, 0.0));
        builder.add_node(StreetNode::new(2, 0.0, 0.001));
        builder.add_node(StreetNode::new(3, 1.0, 1.0));
        builder.add_way(1, 2, StreetEdge::new(111.0)).unwrap();
        builder.build()
    }

    #[test]
    fn successful_measurement_has_one_timing_per_repetition() {
        let timing = Timing {
            warmup: 2,
            repetitions: 5,
        };
        let m = measure(
            &graph(),
            Point::new(0.0, 0.0),
            Point::new(0.001, 0.0),
            Algorithm::Dijkstra,
            HeuristicMode::Admissible,
            timing,
        );

        assert!(m.success);
        assert_eq!(m.timings_ms.len(), 5);
        assert_eq!(m.cost, 111.0);
        assert_eq!(m.explored, 2);
        assert_eq!(m.point_count, 2);
        assert!(m.stats.min_ms <= m.stats.max_ms);
        assert!(m.error.is_none());
    }

    #[test]
    fn unreachable_destination_zeroes_everything() {
        let m = measure(
            &graph(),
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Algorithm::AStar,
            HeuristicMode::Physical,
            Timing::default(),
        );

        assert!(!m.success);
        assert!(m.timings_ms.is_empty());
        assert_eq!(m.stats, TimingStats::default());
        assert_eq!(m.explored, 0);
        assert_eq!(m.error.as_deref(), Some(NO_PATH));
    }

    #[test]
    fn zero_repetitions_is_a_failure() {
        let timing = Timing {
            warmup: 0,
            repetitions: 0,
        };
        let m = measure(
            &graph(),
            Point::new(0.0, 0.0),
            Point::new(0.001, 0.0),
            Algorithm::Dijkstra,
            HeuristicMode::Admissible,
            timing,
        );
        assert!(!m.success);
    }
}
