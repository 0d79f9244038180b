//! This module is responsible for building a street graph and a point of
//! interest catalogue from the data handed over by external suppliers
//! (in-memory builders, JSON graph documents, CSV point tables).

mod builder;
mod json;
mod pois;

pub use builder::GraphBuilder;
pub use json::{GraphDocument, graph_from_reader, load_graph_json};
pub use pois::{load_pois_csv, pois_from_reader};
