//! JSON graph documents as exported from an OSM pedestrian network

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use geo::{Coord, LineString};
use log::info;
use serde::Deserialize;

use super::GraphBuilder;
use crate::model::{EdgeTags, StreetEdge, StreetGraph, StreetNode};
use crate::{Error, NodeId};

#[derive(Debug, Deserialize)]
pub struct GraphDocument {
    pub nodes: Vec<RawNode>,
    pub edges: Vec<RawEdge>,
}

#[derive(Debug, Deserialize)]
pub struct RawNode {
    pub id: NodeId,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub crossing: Option<String>,
    #[serde(default)]
    pub highway: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawEdge {
    pub from: NodeId,
    pub to: NodeId,
    #[serde(default)]
    pub key: Option<u32>,
    pub length: f64,
    /// `[lon, lat]` pairs
    #[serde(default)]
    pub geometry: Option<Vec<[f64; 2]>>,
    /// One-directional edge; two-way segments are the default
    #[serde(default)]
    pub oneway: bool,
    #[serde(flatten)]
    pub tags: EdgeTags,
}

/// Load a street graph from a JSON document on disk
///
/// # Errors
///
/// Returns an error if the file cannot be read or the document is inconsistent
pub fn load_graph_json(path: &Path) -> Result<StreetGraph, Error> {
    let file = File::open(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("Failed to open graph file '{}': {}", path.display(), e),
        )
    })?;
    info!("Loading street graph from {}", path.display());
    graph_from_reader(BufReader::new(file))
}

/// Build a street graph from any JSON source
///
/// # Errors
///
/// Returns an error on malformed JSON, unknown endpoints, invalid lengths or
/// duplicate explicit keys
pub fn graph_from_reader<R: Read>(reader: R) -> Result<StreetGraph, Error> {
    let document: GraphDocument = serde_json::from_reader(reader)?;
    document.into_graph()
}

impl GraphDocument {
    pub fn into_graph(self) -> Result<StreetGraph, Error> {
        let mut builder = GraphBuilder::new();

        for raw in self.nodes {
            let mut node = StreetNode::new(raw.id, raw.lat, raw.lon);
            node.crossing = raw.crossing;
            node.highway = raw.highway;
            builder.add_node(node);
        }

        for raw in self.edges {
            let mut edge = StreetEdge::new(raw.length).with_tags(raw.tags);
            if let Some(points) = raw.geometry {
                let coords = points.into_iter().map(|[x, y]| Coord { x, y }).collect();
                edge = edge.with_geometry(LineString::new(coords));
            }

            match (raw.key, raw.oneway) {
                (Some(key), true) => {
                    builder.add_keyed_edge(raw.from, raw.to, edge.with_key(key))?;
                }
                (Some(key), false) => {
                    builder.add_keyed_way(raw.from, raw.to, edge.with_key(key))?;
                }
                (None, true) => {
                    builder.add_edge(raw.from, raw.to, edge)?;
                }
                (None, false) => {
                    builder.add_way(raw.from, raw.to, edge)?;
                }
            }
        }

        Ok(builder.build())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use crate::model::RawTag;

    use super::*;

    const DOCUMENT: &str = r#"{
        "nodes": [
            {"id": 1, "lat": -3.7700, "lon": -38.4800},
            {"id": 2, "lat": -3.7695, "lon": -38.4800, "crossing": "zebra"},
            {"id": 3, "lat": -3.7690, "lon": -38.4800}
        ],
        "edges": [
            {"from": 1, "to": 2, "length": 55.5, "highway": "steps", "incline": "12%"},
            {"from": 2, "to": 3, "length": 55.5, "oneway": true, "width": 1.2,
             "geometry": [[-38.4800, -3.7695], [-38.4800, -3.7690]]}
        ]
    }"#;

    #[test]
    fn parses_nodes_edges_and_tags() {
        let graph = graph_from_reader(DOCUMENT.as_bytes()).unwrap();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 3);

        let two = graph.node_index(2).unwrap();
        assert!(graph.node(two).unwrap().is_marked_crossing());

        let one = graph.node_index(1).unwrap();
        let steps = graph.edges_between(one, two).next().unwrap();
        assert_eq!(steps.weight().tags.highway.as_deref(), Some("steps"));
        assert_eq!(steps.weight().tags.incline, Some(RawTag::Text("12%".into())));

        let three = graph.node_index(3).unwrap();
        assert_eq!(graph.edges_between(three, two).count(), 0);
        let narrow = graph.edges_between(two, three).next().unwrap();
        assert_eq!(narrow.weight().tags.width, Some(RawTag::Number(1.2)));
        assert!(narrow.weight().geometry.is_some());
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(DOCUMENT.as_bytes()).unwrap();
        let graph = load_graph_json(file.path()).unwrap();
        assert_eq!(graph.node_count(), 3);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_graph_json(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, Error::IoError(_)));
    }

    #[test]
    fn edge_to_unknown_node_fails() {
        let doc = r#"{"nodes": [{"id": 1, "lat": 0, "lon": 0}],
                      "edges": [{"from": 1, "to": 9, "length": 1}]}"#;
        assert!(matches!(
            graph_from_reader(doc.as_bytes()),
            Err(Error::UnknownNode(9))
        ));
    }
}
