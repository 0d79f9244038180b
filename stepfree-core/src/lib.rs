//! Accessibility-aware pedestrian routing.
//!
//! The crate is organised bottom-up:
//!
//! - [`model`] holds the street multigraph, mobility profiles and points of interest
//! - [`weighting`] rewrites edge costs for a mobility profile and restores them
//! - [`routing`] runs the instrumented uniform-cost / heuristic search
//! - [`bench`] samples origin/destination pairs and compares both searches
//! - [`loading`] builds graphs and point catalogues from plain files

pub mod algo;
pub mod bench;
mod error;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;
pub mod weighting;

pub use error::Error;

pub use algo::distance::{METERS_PER_DEGREE, equirectangular_distance};
pub use bench::{
    Benchmark, BenchmarkConfig, BenchmarkReport, BenchmarkSummary, ComparisonRecord,
    ComparisonRow, DistanceCategory, Measurement, PoiCatalog, TimingStats,
};
pub use loading::{GraphBuilder, load_graph_json, load_pois_csv};
pub use model::{MobilityProfile, StreetEdge, StreetGraph, StreetNode};
pub use routing::{
    Algorithm, HeuristicMode, PathRoute, RouteOutcome, SearchResult, route_between, search,
};
pub use weighting::{WeightingReport, apply_profile, restore_original_costs};

/// Opaque identifier of a street node, as issued by the graph supplier (OSM id)
pub type NodeId = i64;

/// Traversal cost in accessibility-adjusted meters
pub type Cost = f64;
