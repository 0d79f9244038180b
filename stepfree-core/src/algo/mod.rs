//! Geometric helpers shared by the search heuristic and the benchmark

pub mod distance;
