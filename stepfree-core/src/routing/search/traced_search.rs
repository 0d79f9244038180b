use std::collections::BinaryHeap;

use fixedbitset::FixedBitSet;
use hashbrown::HashMap;
use petgraph::{graph::NodeIndex, visit::EdgeRef};

use super::state::State;
use super::{PathRoute, SearchError, SearchResult};
use crate::Cost;
use crate::model::StreetGraph;
use crate::routing::heuristic::{GeoHeuristic, Heuristic, HeuristicMode, ZeroHeuristic};

/// Shortest path from `origin` to `target`, guided by `heuristic`.
///
/// Label-setting search with lazy deletion: a node may sit in the queue more
/// than once, stale entries are skipped when popped. Between two nodes the
/// cheapest parallel edge is used (lowest key on equal cost). The search stops
/// once `target` is popped, so `explored` counts every node settled up to and
/// including the target, or every node settled when the target is unreachable.
///
/// [`ZeroHeuristic`] turns this into Dijkstra's algorithm.
///
/// # Errors
///
/// Returns [`SearchError::InvalidNode`] if either node is not in the graph
pub fn search<H: Heuristic + ?Sized>(
    graph: &StreetGraph,
    origin: NodeIndex,
    target: NodeIndex,
    heuristic: &H,
) -> Result<SearchResult, SearchError> {
    for node in [origin, target] {
        if !graph.contains(node) {
            return Err(SearchError::InvalidNode(node.index()));
        }
    }

    // Estimate capacity based on graph size
    let estimated_nodes = graph.node_count().min(1000);
    let mut costs: HashMap<NodeIndex, Cost> = HashMap::with_capacity(estimated_nodes);
    let mut predecessors: HashMap<NodeIndex, NodeIndex> = HashMap::with_capacity(estimated_nodes);
    let mut settled = FixedBitSet::with_capacity(graph.node_count());
    let mut heap = BinaryHeap::with_capacity(estimated_nodes / 4);
    // Cheapest edge per neighbour of the node being expanded: (node, cost, key)
    let mut neighbours: Vec<(NodeIndex, Cost, u32)> = Vec::new();
    let mut explored = 0;
    let mut reached = false;

    costs.insert(origin, 0.0);
    heap.push(State {
        priority: heuristic.estimate(graph, origin),
        node: origin,
    });

    while let Some(State { node, .. }) = heap.pop() {
        // Skip stale entries of already settled nodes
        if settled.put(node.index()) {
            continue;
        }
        explored += 1;

        if node == target {
            reached = true;
            break;
        }

        let Some(&cost) = costs.get(&node) else {
            continue;
        };

        neighbours.clear();
        for edge in graph.edges(node) {
            let next = edge.target();
            if settled.contains(next.index()) {
                continue;
            }
            let weight = edge.weight();
            match neighbours.iter_mut().find(|(n, _, _)| *n == next) {
                Some(best) => {
                    if weight.cost < best.1 || (weight.cost == best.1 && weight.key < best.2) {
                        *best = (next, weight.cost, weight.key);
                    }
                }
                None => neighbours.push((next, weight.cost, weight.key)),
            }
        }

        for &(next, edge_cost, _) in &neighbours {
            let next_cost = cost + edge_cost;

            // Add or update cost if better using Entry API
            match costs.entry(next) {
                hashbrown::hash_map::Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                }
                hashbrown::hash_map::Entry::Occupied(mut entry) => {
                    if next_cost < *entry.get() {
                        *entry.get_mut() = next_cost;
                    } else {
                        continue;
                    }
                }
            }
            predecessors.insert(next, node);
            heap.push(State {
                priority: next_cost + heuristic.estimate(graph, next),
                node: next,
            });
        }
    }

    let route = if reached {
        let mut nodes = vec![target];
        let mut current = target;
        while current != origin {
            match predecessors.get(&current) {
                Some(&prev) => {
                    nodes.push(prev);
                    current = prev;
                }
                None => break,
            }
        }
        nodes.reverse(); // Now path is from origin to target

        Some(PathRoute {
            nodes,
            cost: costs.get(&target).copied().unwrap_or_default(),
        })
    } else {
        None
    };

    Ok(SearchResult {
        route,
        explored,
        weighting_epoch: graph.weighting_epoch(),
    })
}

/// Same as [`search`], but refuses to run if the graph weighting epoch is
/// not `expected_epoch`
///
/// # Errors
///
/// Returns [`SearchError::WeightingMismatch`] on an epoch mismatch, or
/// [`SearchError::InvalidNode`] for unknown nodes
pub fn search_at_epoch<H: Heuristic + ?Sized>(
    graph: &StreetGraph,
    expected_epoch: u64,
    origin: NodeIndex,
    target: NodeIndex,
    heuristic: &H,
) -> Result<SearchResult, SearchError> {
    let actual = graph.weighting_epoch();
    if actual != expected_epoch {
        return Err(SearchError::WeightingMismatch {
            expected: expected_epoch,
            actual,
        });
    }
    search(graph, origin, target, heuristic)
}

/// Uniform-cost search
///
/// # Errors
///
/// Returns [`SearchError::InvalidNode`] if either node is not in the graph
pub fn dijkstra(
    graph: &StreetGraph,
    origin: NodeIndex,
    target: NodeIndex,
) -> Result<SearchResult, SearchError> {
    search(graph, origin, target, &ZeroHeuristic)
}

/// Heuristic search guided by the straight-line distance to `target`
///
/// # Errors
///
/// Returns [`SearchError::InvalidNode`] if either node is not in the graph
pub fn astar(
    graph: &StreetGraph,
    origin: NodeIndex,
    target: NodeIndex,
    mode: HeuristicMode,
) -> Result<SearchResult, SearchError> {
    let heuristic = GeoHeuristic::towards(graph, target, mode)?;
    search(graph, origin, target, &heuristic)
}
