use thiserror::Error;

use crate::NodeId;
use crate::routing::search::SearchError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No graph node found near ({lat}, {lon})")]
    NodeResolution { lat: f64, lon: f64 },
    #[error("Unknown node id {0}")]
    UnknownNode(NodeId),
    #[error("No path between the requested nodes")]
    NoPath,
    #[error("Unknown mobility profile: {0}")]
    UnknownProfile(String),
    #[error("Search error: {0}")]
    Search(#[from] SearchError),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}
