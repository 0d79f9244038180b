//! Accessibility weighting of the street graph.
//!
//! [`apply_profile`] rewrites every edge cost for a [`crate::MobilityProfile`]
//! and [`restore_original_costs`] puts the physical costs back. Both go through
//! `&mut StreetGraph` and bump the graph's weighting epoch.

mod tags;
mod transform;

pub use tags::{SurfaceClass, TagValue, WIDTH_UNITS, classify_surface, parse_incline, parse_width};
pub use transform::{
    INCLINE_THRESHOLD_PERCENT, MIN_COMFORTABLE_WIDTH, WeightingReport, apply_profile, edge_cost,
    penalty_factor, restore_original_costs,
};
