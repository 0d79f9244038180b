//! Shortest-path search over the weighted street graph

pub mod heuristic;
mod route;
pub mod search;

pub use heuristic::{GeoHeuristic, Heuristic, HeuristicMode, ZeroHeuristic};
pub use route::{
    Algorithm, RouteOutcome, has_path, resolve_point, route_between, route_geometry,
    route_between_nodes,
};
pub use search::{
    PathRoute, SearchError, SearchResult, astar, dijkstra, search, search_at_epoch,
};
