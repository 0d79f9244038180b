//! Pedestrian street network model

pub mod components;
pub mod network;

pub use components::{EdgeTags, RawTag, StreetEdge, StreetNode};
pub use network::{IndexedPoint, StreetGraph};
