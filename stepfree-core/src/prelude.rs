pub use crate::Error;

// Model and loading
pub use crate::loading::{GraphBuilder, load_graph_json, load_pois_csv};
pub use crate::model::{
    MobilityProfile, PoiCatalog, ProfileCatalog, StreetEdge, StreetGraph, StreetNode,
};

// Weighting and search
pub use crate::routing::{
    Algorithm, HeuristicMode, RouteOutcome, SearchResult, astar, dijkstra, route_between,
};
pub use crate::weighting::{WeightingReport, apply_profile, restore_original_costs};

// Benchmark
pub use crate::bench::{
    Benchmark, BenchmarkConfig, BenchmarkReport, BenchmarkSummary, ComparisonRecord,
    ComparisonRow,
};

pub use crate::Cost; // accessibility-adjusted meters
pub use crate::NodeId;
