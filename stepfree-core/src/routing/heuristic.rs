//! Cost-to-go estimates for the heuristic search

use geo::Point;
use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};

use super::search::SearchError;
use crate::model::StreetGraph;
use crate::{Cost, equirectangular_distance};

pub trait Heuristic {
    /// Estimated remaining cost from `node` to the search target
    fn estimate(&self, graph: &StreetGraph, node: NodeIndex) -> Cost;
}

/// Always zero; recovers uniform-cost search
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroHeuristic;

impl Heuristic for ZeroHeuristic {
    fn estimate(&self, _graph: &StreetGraph, _node: NodeIndex) -> Cost {
        0.0
    }
}

/// How the straight-line heuristic relates to weighted edge costs.
///
/// Profile penalties can push edge costs above or below the physical length,
/// so the plain geographic distance is only a lower bound for an unweighted
/// graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeuristicMode {
    /// Geographic distance as is; may overestimate once discounts
    /// (ramps, crossings, paved surfaces) bring costs below the physical length
    Physical,
    /// Geographic distance scaled by the smallest `cost / length` ratio of the
    /// current weighting, capped at 1.0
    #[default]
    Admissible,
}

impl HeuristicMode {
    pub fn scale(self, graph: &StreetGraph) -> f64 {
        match self {
            HeuristicMode::Physical => 1.0,
            HeuristicMode::Admissible => graph.weighting().min_cost_ratio.clamp(0.0, 1.0),
        }
    }
}

impl std::fmt::Display for HeuristicMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HeuristicMode::Physical => write!(f, "physical"),
            HeuristicMode::Admissible => write!(f, "admissible"),
        }
    }
}

impl std::str::FromStr for HeuristicMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "physical" => Ok(HeuristicMode::Physical),
            "admissible" => Ok(HeuristicMode::Admissible),
            other => Err(format!("unknown heuristic mode '{other}'")),
        }
    }
}

/// Scaled equirectangular distance from a node to a fixed target position
#[derive(Debug, Clone, Copy)]
pub struct GeoHeuristic {
    target: Point<f64>,
    scale: f64,
}

impl GeoHeuristic {
    pub fn new(target: Point<f64>, scale: f64) -> Self {
        Self { target, scale }
    }

    /// Heuristic towards a graph node, scaled according to `mode`
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidNode`] if `target` is not in the graph
    pub fn towards(
        graph: &StreetGraph,
        target: NodeIndex,
        mode: HeuristicMode,
    ) -> Result<Self, SearchError> {
        let node = graph
            .node(target)
            .ok_or(SearchError::InvalidNode(target.index()))?;
        Ok(Self::new(node.geometry, mode.scale(graph)))
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }
}

impl Heuristic for GeoHeuristic {
    fn estimate(&self, graph: &StreetGraph, node: NodeIndex) -> Cost {
        graph.node(node).map_or(0.0, |n| {
            equirectangular_distance(n.geometry, self.target) * self.scale
        })
    }
}

impl<F> Heuristic for F
where
    F: Fn(&StreetGraph, NodeIndex) -> Cost,
{
    fn estimate(&self, graph: &StreetGraph, node: NodeIndex) -> Cost {
        self(graph, node)
    }
}
