//! Street multigraph with spatial lookup and weighting bookkeeping

use geo::Point;
use hashbrown::HashMap;
use petgraph::Directed;
use petgraph::graph::{DiGraph, EdgeReference, Edges, NodeIndex};
use rstar::{RTree, primitives::GeomWithData};

use super::components::{StreetEdge, StreetNode};
use crate::NodeId;
use crate::algo::distance::{METERS_PER_DEGREE, equirectangular_distance};

/// Node position in the spatial index, `[lon, lat]` with the graph index attached
pub type IndexedPoint = GeomWithData<[f64; 2], NodeIndex>;

/// Which edge costs are currently live in the graph.
///
/// `epoch` is bumped by every weighting or restore pass so that a search can
/// report, and a caller can assert, the weighting it ran against.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightingState {
    pub epoch: u64,
    /// Name of the last applied profile, `None` when costs are physical lengths
    pub profile: Option<String>,
    /// Smallest `cost / length` over edges with positive length
    pub min_cost_ratio: f64,
}

impl Default for WeightingState {
    fn default() -> Self {
        Self {
            epoch: 0,
            profile: None,
            min_cost_ratio: 1.0,
        }
    }
}

/// Pedestrian street network.
///
/// Directed multigraph: a two-way footway is stored as two edges and parallel
/// edges between the same node pair are kept apart by [`StreetEdge::key`].
/// Only the [`crate::weighting`] module writes to edge costs.
#[derive(Debug, Clone)]
pub struct StreetGraph {
    pub(crate) graph: DiGraph<StreetNode, StreetEdge>,
    id_index: HashMap<NodeId, NodeIndex>,
    rtree: RTree<IndexedPoint>,
    pub(crate) weighting: WeightingState,
}

impl StreetGraph {
    pub(crate) fn new(graph: DiGraph<StreetNode, StreetEdge>) -> Self {
        let id_index = graph
            .node_indices()
            .map(|idx| (graph[idx].id, idx))
            .collect();

        let points = graph
            .node_indices()
            .map(|idx| {
                let node = &graph[idx];
                IndexedPoint::new([node.lon(), node.lat()], idx)
            })
            .collect();

        Self {
            graph,
            id_index,
            rtree: RTree::bulk_load(points),
            weighting: WeightingState::default(),
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Read-only view of the underlying petgraph graph
    pub fn graph(&self) -> &DiGraph<StreetNode, StreetEdge> {
        &self.graph
    }

    pub fn node(&self, index: NodeIndex) -> Option<&StreetNode> {
        self.graph.node_weight(index)
    }

    pub fn node_index(&self, id: NodeId) -> Option<NodeIndex> {
        self.id_index.get(&id).copied()
    }

    pub fn node_id(&self, index: NodeIndex) -> Option<NodeId> {
        self.graph.node_weight(index).map(|node| node.id)
    }

    pub fn contains(&self, index: NodeIndex) -> bool {
        index.index() < self.graph.node_count()
    }

    /// Outgoing edges of `node`, parallel edges included
    pub fn edges(&self, node: NodeIndex) -> Edges<'_, StreetEdge, Directed> {
        self.graph.edges(node)
    }

    /// All edges going from `from` to `to`
    pub fn edges_between(
        &self,
        from: NodeIndex,
        to: NodeIndex,
    ) -> impl Iterator<Item = EdgeReference<'_, StreetEdge>> {
        self.graph.edges_connecting(from, to)
    }

    /// Nearest graph node to a point in meters.
    ///
    /// The R-tree is in degrees, so candidates come out in degree order and are
    /// re-ranked by [`equirectangular_distance`]. A longitude degree is never
    /// longer than a latitude degree, which bounds the metric distance of every
    /// later candidate from below by `cos(lat)` times its degree distance.
    pub fn nearest_node(&self, point: &Point<f64>) -> Option<NodeIndex> {
        let shrink = point.y().to_radians().cos().abs() * METERS_PER_DEGREE;
        let mut best: Option<(f64, NodeIndex)> = None;

        for (indexed, degrees_2) in self
            .rtree
            .nearest_neighbor_iter_with_distance_2(&[point.x(), point.y()])
        {
            if best.is_some_and(|(best_m, _)| shrink * degrees_2.sqrt() > best_m) {
                break;
            }
            let [lon, lat] = *indexed.geom();
            let meters = equirectangular_distance(*point, Point::new(lon, lat));
            if best.is_none_or(|(best_m, _)| meters < best_m) {
                best = Some((meters, indexed.data));
            }
        }

        best.map(|(_, idx)| idx)
    }

    pub fn weighting(&self) -> &WeightingState {
        &self.weighting
    }

    pub fn weighting_epoch(&self) -> u64 {
        self.weighting.epoch
    }

    /// Node ids of a path given as graph indices
    pub fn path_ids(&self, path: &[NodeIndex]) -> Vec<NodeId> {
        path.iter().filter_map(|&idx| self.node_id(idx)).collect()
    }
}
