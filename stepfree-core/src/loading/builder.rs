use hashbrown::HashMap;
use log::{info, warn};
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};

use crate::{Error, NodeId, StreetEdge, StreetGraph, StreetNode};

/// Incremental constructor for [`StreetGraph`].
///
/// Nodes must be added before the edges that reference them. Edge keys are
/// assigned per directed node pair as one past the largest key already used
/// (0, 1, ...), unless the edge is added with [`GraphBuilder::add_keyed_edge`].
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: DiGraph<StreetNode, StreetEdge>,
    index: HashMap<NodeId, NodeIndex>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node; a repeated id keeps the first node and returns its index
    pub fn add_node(&mut self, node: StreetNode) -> NodeIndex {
        if let Some(&existing) = self.index.get(&node.id) {
            warn!("Duplicate node id {} ignored", node.id);
            return existing;
        }
        let id = node.id;
        let idx = self.graph.add_node(node);
        self.index.insert(id, idx);
        idx
    }

    /// Adds a directed edge, assigning the next free key for `(from, to)`
    ///
    /// # Errors
    ///
    /// Returns an error if an endpoint is unknown or the length is negative or not finite
    pub fn add_edge(
        &mut self,
        from: NodeId,
        to: NodeId,
        edge: StreetEdge,
    ) -> Result<EdgeIndex, Error> {
        let (u, v) = self.endpoints(from, to)?;
        validate_length(from, to, edge.length)?;

        let key = match self
            .graph
            .edges_connecting(u, v)
            .map(|existing| existing.weight().key)
            .max()
        {
            None => 0,
            Some(highest) => highest.checked_add(1).ok_or_else(|| {
                Error::InvalidData(format!("no free edge key for {from} -> {to}"))
            })?,
        };

        Ok(self.graph.add_edge(u, v, edge.with_key(key)))
    }

    /// Adds a directed edge keeping its key
    ///
    /// # Errors
    ///
    /// Returns an error if an endpoint is unknown, the length is invalid or
    /// a parallel edge already uses the same key
    pub fn add_keyed_edge(
        &mut self,
        from: NodeId,
        to: NodeId,
        edge: StreetEdge,
    ) -> Result<EdgeIndex, Error> {
        let (u, v) = self.endpoints(from, to)?;
        validate_length(from, to, edge.length)?;

        if self
            .graph
            .edges_connecting(u, v)
            .any(|existing| existing.weight().key == edge.key)
        {
            return Err(Error::InvalidData(format!(
                "duplicate edge key {} for {from} -> {to}",
                edge.key
            )));
        }

        Ok(self.graph.add_edge(u, v, edge))
    }

    /// Adds a walkable segment in both directions
    ///
    /// # Errors
    ///
    /// Same conditions as [`GraphBuilder::add_edge`]
    pub fn add_way(
        &mut self,
        a: NodeId,
        b: NodeId,
        edge: StreetEdge,
    ) -> Result<(EdgeIndex, EdgeIndex), Error> {
        let reverse = reversed(&edge);
        let forward = self.add_edge(a, b, edge)?;
        let backward = self.add_edge(b, a, reverse)?;
        Ok((forward, backward))
    }

    /// Adds a walkable segment in both directions, both edges carrying `edge.key`
    ///
    /// # Errors
    ///
    /// Same conditions as [`GraphBuilder::add_keyed_edge`]
    pub fn add_keyed_way(
        &mut self,
        a: NodeId,
        b: NodeId,
        edge: StreetEdge,
    ) -> Result<(EdgeIndex, EdgeIndex), Error> {
        let reverse = reversed(&edge);
        let forward = self.add_keyed_edge(a, b, edge)?;
        let backward = self.add_keyed_edge(b, a, reverse)?;
        Ok((forward, backward))
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn build(self) -> StreetGraph {
        info!(
            "Street graph built: {} nodes, {} edges",
            self.graph.node_count(),
            self.graph.edge_count()
        );
        StreetGraph::new(self.graph)
    }

    fn endpoints(&self, from: NodeId, to: NodeId) -> Result<(NodeIndex, NodeIndex), Error> {
        let u = self.index.get(&from).ok_or(Error::UnknownNode(from))?;
        let v = self.index.get(&to).ok_or(Error::UnknownNode(to))?;
        Ok((*u, *v))
    }
}

/// Copy of `edge` for the opposite direction, geometry reversed
fn reversed(edge: &StreetEdge) -> StreetEdge {
    let mut reverse = edge.clone();
    if let Some(geometry) = reverse.geometry.as_mut() {
        geometry.0.reverse();
    }
    reverse
}

fn validate_length(from: NodeId, to: NodeId, length: f64) -> Result<(), Error> {
    if length.is_finite() && length >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidData(format!(
            "edge {from} -> {to} has invalid length {length}"
        )))
    }
}
