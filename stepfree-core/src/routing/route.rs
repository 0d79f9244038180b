use std::fmt;
use std::str::FromStr;

use geo::Point;
use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};

use super::heuristic::HeuristicMode;
use super::search::{self, SearchError, SearchResult};
use crate::model::StreetGraph;
use crate::{Cost, Error, NodeId};

/// The two search strategies under comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    #[serde(rename = "dijkstra")]
    Dijkstra,
    #[serde(rename = "astar")]
    AStar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 2] = [Algorithm::Dijkstra, Algorithm::AStar];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::AStar => "astar",
        }
    }

    /// Run this strategy between two graph nodes
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidNode`] if either node is not in the graph
    pub fn run(
        self,
        graph: &StreetGraph,
        origin: NodeIndex,
        target: NodeIndex,
        mode: HeuristicMode,
    ) -> Result<SearchResult, SearchError> {
        match self {
            Algorithm::Dijkstra => search::dijkstra(graph, origin, target),
            Algorithm::AStar => search::astar(graph, origin, target, mode),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dijkstra" => Ok(Algorithm::Dijkstra),
            "astar" | "a*" => Ok(Algorithm::AStar),
            other => Err(format!("unknown algorithm '{other}'")),
        }
    }
}

/// A found route with its geometry
#[derive(Debug, Clone, PartialEq)]
pub struct RouteOutcome {
    pub origin: NodeIndex,
    pub destination: NodeIndex,
    pub nodes: Vec<NodeId>,
    pub cost: Cost,
    /// `(lat, lon)` points along the route
    pub points: Vec<(f64, f64)>,
    pub explored: usize,
}

/// Nearest graph node to a coordinate
///
/// # Errors
///
/// Returns [`Error::NodeResolution`] when the graph has no nodes
pub fn resolve_point(graph: &StreetGraph, point: Point<f64>) -> Result<NodeIndex, Error> {
    graph.nearest_node(&point).ok_or(Error::NodeResolution {
        lat: point.y(),
        lon: point.x(),
    })
}

/// Whether any directed path leads from `from` to `to`, ignoring costs
pub fn has_path(graph: &StreetGraph, from: NodeIndex, to: NodeIndex) -> bool {
    graph.contains(from)
        && graph.contains(to)
        && petgraph::algo::has_path_connecting(graph.graph(), from, to, None)
}

/// Route between two coordinates, each snapped to its nearest graph node.
///
/// `Ok(None)` means both points resolved but no path connects them.
///
/// # Errors
///
/// Returns [`Error::NodeResolution`] when a point cannot be snapped
pub fn route_between(
    graph: &StreetGraph,
    origin: Point<f64>,
    destination: Point<f64>,
    algorithm: Algorithm,
    mode: HeuristicMode,
) -> Result<Option<RouteOutcome>, Error> {
    let from = resolve_point(graph, origin)?;
    let to = resolve_point(graph, destination)?;
    route_between_nodes(graph, from, to, algorithm, mode)
}

/// Route between two graph nodes with geometry extraction
///
/// # Errors
///
/// Returns [`Error::Search`] if either node is not in the graph
pub fn route_between_nodes(
    graph: &StreetGraph,
    from: NodeIndex,
    to: NodeIndex,
    algorithm: Algorithm,
    mode: HeuristicMode,
) -> Result<Option<RouteOutcome>, Error> {
    let result = algorithm.run(graph, from, to, mode)?;
    let explored = result.explored;

    Ok(result.route.map(|route| RouteOutcome {
        origin: from,
        destination: to,
        nodes: graph.path_ids(&route.nodes),
        cost: route.cost,
        points: route_geometry(graph, &route.nodes),
        explored,
    }))
}

/// `(lat, lon)` points of a node path.
///
/// Each hop uses the parallel edge the search traverses (cheapest, lowest
/// key); its geometry when present, otherwise the straight segment between
/// the two nodes. A single-node path yields that node's position.
pub fn route_geometry(graph: &StreetGraph, nodes: &[NodeIndex]) -> Vec<(f64, f64)> {
    let position = |idx: NodeIndex| graph.node(idx).map(|n| (n.lat(), n.lon()));

    if let [only] = nodes {
        return position(*only).into_iter().collect();
    }

    let mut points = Vec::with_capacity(nodes.len() * 2);
    for hop in nodes.windows(2) {
        let (u, v) = (hop[0], hop[1]);
        let edge = graph
            .edges_between(u, v)
            .map(|e| e.weight())
            .min_by(|a, b| a.cost().total_cmp(&b.cost()).then(a.key.cmp(&b.key)));

        let Some(edge) = edge else {
            continue;
        };

        match &edge.geometry {
            Some(line) => points.extend(line.coords().map(|c| (c.y, c.x))),
            None => points.extend(position(u).into_iter().chain(position(v))),
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use geo::line_string;

    use super::*;
    use crate::loading::GraphBuilder;
    use crate::model::{StreetEdge, StreetNode};

    fn graph() -> StreetGraph {
        let mut builder = GraphBuilder::new();
        builder.add_node(StreetNode::new(1, 0.0, 0.0));
        builder.add_node(StreetNode::new(2, 0.0, 0.001));
        builder.add_node(StreetNode::new(3, 0.001, 0.001));
        builder.add_node(StreetNode::new(9, 1.0, 1.0));
        builder.add_way(1, 2, StreetEdge::new(111.0)).unwrap();
        let bend = line_string![(x: 0.001, y: 0.0), (x: 0.0012, y: 0.0005), (x: 0.001, y: 0.001)];
        builder
            .add_edge(2, 3, StreetEdge::new(115.0).with_geometry(bend))
            .unwrap();
        builder.build()
    }

    #[test]
    fn route_between_points_snaps_and_extracts_geometry() {
        let graph = graph();
        let outcome = route_between(
            &graph,
            Point::new(0.00001, 0.00001),
            Point::new(0.00099, 0.00101),
            Algorithm::Dijkstra,
            HeuristicMode::Admissible,
        )
        .unwrap()
        .unwrap();

        assert_eq!(outcome.nodes, vec![1, 2, 3]);
        assert_eq!(outcome.cost, 226.0);
        assert_eq!(
            outcome.points,
            vec![(0.0, 0.0), (0.0, 0.001), (0.0, 0.001), (0.0005, 0.0012), (0.001, 0.001)]
        );
    }

    #[test]
    fn no_path_is_none_not_error() {
        let graph = graph();
        let outcome = route_between(
            &graph,
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Algorithm::AStar,
            HeuristicMode::Physical,
        )
        .unwrap();
        assert!(outcome.is_none());
    }

    #[test]
    fn empty_graph_cannot_resolve() {
        let graph = GraphBuilder::new().build();
        let err = resolve_point(&graph, Point::new(2.0, 1.0)).unwrap_err();
        assert!(matches!(err, Error::NodeResolution { lat, lon } if lat == 1.0 && lon == 2.0));
    }

    #[test]
    fn connectivity_respects_direction() {
        let graph = graph();
        let (one, three) = (graph.node_index(1).unwrap(), graph.node_index(3).unwrap());
        assert!(has_path(&graph, one, three));
        assert!(!has_path(&graph, three, one));
        assert!(!has_path(&graph, one, NodeIndex::new(77)));
    }

    #[test]
    fn algorithm_names_round_trip() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.name().parse::<Algorithm>(), Ok(algorithm));
        }
        assert_eq!(
            serde_json::to_string(&Algorithm::AStar).unwrap(),
            "\"astar\""
        );
    }
}
