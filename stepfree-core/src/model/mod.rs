//! Data model for accessibility-aware pedestrian routing
//!
//! Contains the street multigraph, mobility profiles and points of interest.

pub mod poi;
pub mod profile;
pub mod streets;

pub use poi::{PoiCatalog, PointOfInterest};
pub use profile::{MobilityProfile, ProfileCatalog};
pub use streets::network::{StreetGraph, WeightingState};
pub use streets::{EdgeTags, RawTag, StreetEdge, StreetNode};
