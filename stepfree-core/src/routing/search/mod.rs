//! Instrumented label-setting search (uniform-cost and heuristic-guided)

mod state;
mod traced_search;

use petgraph::graph::NodeIndex;
use thiserror::Error;

use crate::{Cost, Error};

pub use traced_search::{astar, dijkstra, search, search_at_epoch};

#[derive(Error, Debug, PartialEq)]
pub enum SearchError {
    #[error("Invalid node index {0}")]
    InvalidNode(usize),
    #[error("Graph weighting changed: expected epoch {expected}, found {actual}")]
    WeightingMismatch { expected: u64, actual: u64 },
}

/// Minimum-cost path found by a search
#[derive(Debug, Clone, PartialEq)]
pub struct PathRoute {
    /// Origin first, destination last
    pub nodes: Vec<NodeIndex>,
    pub cost: Cost,
}

/// Outcome of one search run.
///
/// `route` is `None` when the destination is unreachable; that is a normal
/// negative result, not an error.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub route: Option<PathRoute>,
    /// Number of distinct nodes settled, destination included
    pub explored: usize,
    /// Weighting epoch of the graph the search ran against
    pub weighting_epoch: u64,
}

impl SearchResult {
    pub fn is_found(&self) -> bool {
        self.route.is_some()
    }

    pub fn cost(&self) -> Option<Cost> {
        self.route.as_ref().map(|route| route.cost)
    }

    /// Path nodes, empty when no path exists
    pub fn nodes(&self) -> &[NodeIndex] {
        self.route.as_ref().map_or(&[], |route| route.nodes.as_slice())
    }

    /// # Errors
    ///
    /// Returns [`Error::NoPath`] when the destination was not reached
    pub fn into_route(self) -> Result<PathRoute, Error> {
        self.route.ok_or(Error::NoPath)
    }
}
