use std::cmp::Ordering;

use petgraph::graph::NodeIndex;

use crate::Cost;

/// Queue entry: `priority` = accumulated cost + heuristic estimate
#[derive(Copy, Clone, Debug)]
pub(super) struct State {
    pub(super) priority: Cost,
    pub(super) node: NodeIndex,
}

// Implement Ord for State to use in BinaryHeap
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap by priority (reversed from standard Rust BinaryHeap),
        // lower node index first on equal priority
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for State {}
