use fixedbitset::FixedBitSet;
use log::{info, warn};

use super::tags::{SurfaceClass, classify_surface, parse_incline, parse_width};
use crate::model::{EdgeTags, MobilityProfile, StreetEdge, StreetGraph};
use crate::{Cost, Error};

/// Inclines steeper than this (in percent, either direction) are penalized
pub const INCLINE_THRESHOLD_PERCENT: f64 = 5.0;
/// Ways narrower than this (in meters) are penalized for accessibility profiles
pub const MIN_COMFORTABLE_WIDTH: f64 = 1.5;

const RAMP_DISCOUNT: f64 = 0.7;
const MARKED_CROSSING_DISCOUNT: f64 = 0.8;
const IRREGULAR_SURFACE_PENALTY: f64 = 2.0;
const SOLID_SURFACE_DISCOUNT: f64 = 0.9;
const NARROW_WAY_PENALTY: f64 = 1.5;
/// Edges whose cost grows beyond this multiple of the original are reported
const SIGNIFICANT_PENALTY: f64 = 1.5;

/// Summary of one weighting pass
#[derive(Debug, Clone, PartialEq)]
pub struct WeightingReport {
    /// Weighting epoch of the graph after the pass
    pub epoch: u64,
    pub profile: String,
    /// Nodes classified as marked pedestrian crossings
    pub crossings: usize,
    /// Edges whose cost exceeds 1.5 x their original cost
    pub penalized_edges: usize,
    pub edges: usize,
    /// The pass ran on top of a previous weighting instead of physical costs
    pub compounded: bool,
}

/// Multiplicative penalty of one edge for a profile.
///
/// `touches_crossing` tells whether either endpoint is a marked crossing.
/// Malformed incline or width values contribute nothing.
pub fn penalty_factor(tags: &EdgeTags, profile: &MobilityProfile, touches_crossing: bool) -> f64 {
    let mut factor = 1.0;
    let highway = tags.highway.as_deref().unwrap_or_default();

    match tags.wheelchair.as_deref() {
        Some("no") if profile.requires_accessibility => factor *= profile.no_ramp_penalty,
        Some("limited") => factor *= profile.no_ramp_penalty * 0.5,
        _ => {}
    }

    if highway == "steps" {
        factor *= profile.stairs_penalty;
    }

    if let Some(incline) = parse_incline(tags.incline.as_ref()).value() {
        if incline.abs() > INCLINE_THRESHOLD_PERCENT {
            factor *= profile.incline_penalty;
        }
    }

    let is_ramp = highway.contains("ramp") || tags.ramp.as_deref() == Some("yes");
    if is_ramp && profile.requires_accessibility {
        factor *= RAMP_DISCOUNT;
    }

    if profile.prefers_marked_crossings {
        if touches_crossing {
            factor *= MARKED_CROSSING_DISCOUNT;
        } else {
            factor *= profile.no_crossing_penalty;
        }
    }

    if profile.requires_accessibility {
        match classify_surface(tags.surface.as_deref()) {
            SurfaceClass::Irregular => factor *= IRREGULAR_SURFACE_PENALTY,
            SurfaceClass::Solid => factor *= SOLID_SURFACE_DISCOUNT,
            SurfaceClass::Other => {}
        }

        if let Some(width) = parse_width(tags.width.as_ref()).value() {
            if width < MIN_COMFORTABLE_WIDTH {
                factor *= NARROW_WAY_PENALTY;
            }
        }
    }

    factor
}

/// New cost of an edge: its current cost times the profile's penalty factor
pub fn edge_cost(edge: &StreetEdge, profile: &MobilityProfile, touches_crossing: bool) -> Cost {
    edge.cost * penalty_factor(&edge.tags, profile, touches_crossing)
}

/// Rewrite every edge cost of the graph for `profile`.
///
/// The cost an edge had before its first weighting is kept and never
/// overwritten. Applying a second profile without calling
/// [`restore_original_costs`] first compounds both penalties: the second pass
/// starts from the first pass's output.
///
/// # Errors
///
/// Returns an error if the profile has negative or non-finite coefficients
pub fn apply_profile(
    graph: &mut StreetGraph,
    profile: &MobilityProfile,
) -> Result<WeightingReport, Error> {
    profile.validate()?;

    let compounded = graph.weighting.profile.is_some();
    if let Some(previous) = &graph.weighting.profile {
        warn!(
            "Applying profile '{}' on top of '{previous}' without restoring original costs",
            profile.name
        );
    }

    let mut crossings = FixedBitSet::with_capacity(graph.graph.node_count());
    for idx in graph.graph.node_indices() {
        if graph.graph[idx].is_marked_crossing() {
            crossings.insert(idx.index());
        }
    }

    let mut penalized_edges = 0;
    for idx in graph.graph.edge_indices() {
        let Some((u, v)) = graph.graph.edge_endpoints(idx) else {
            continue;
        };
        let touches_crossing = crossings.contains(u.index()) || crossings.contains(v.index());

        let edge = &mut graph.graph[idx];
        let cost = edge_cost(edge, profile, touches_crossing);
        let original = *edge.original_cost.get_or_insert(edge.cost);
        edge.cost = cost;

        if cost > original * SIGNIFICANT_PENALTY {
            penalized_edges += 1;
        }
    }

    graph.weighting.epoch += 1;
    graph.weighting.profile = Some(profile.name.clone());
    graph.weighting.min_cost_ratio = min_cost_ratio(graph);

    let report = WeightingReport {
        epoch: graph.weighting.epoch,
        profile: profile.name.clone(),
        crossings: crossings.count_ones(..),
        penalized_edges,
        edges: graph.graph.edge_count(),
        compounded,
    };
    info!(
        "Weighted graph for profile '{}': {} crossings, {} of {} edges penalized",
        report.profile, report.crossings, report.penalized_edges, report.edges
    );
    Ok(report)
}

/// Put every stored original cost back in place. Edges that were never
/// weighted are left untouched. Returns the new weighting epoch.
pub fn restore_original_costs(graph: &mut StreetGraph) -> u64 {
    let mut restored = 0usize;
    for edge in graph.graph.edge_weights_mut() {
        if let Some(original) = edge.original_cost {
            edge.cost = original;
            restored += 1;
        }
    }

    graph.weighting.epoch += 1;
    graph.weighting.profile = None;
    graph.weighting.min_cost_ratio = min_cost_ratio(graph);

    log::debug!("Restored original cost of {restored} edges");
    graph.weighting.epoch
}

/// Smallest `cost / length` over edges with a positive length, 1.0 if none
fn min_cost_ratio(graph: &StreetGraph) -> f64 {
    graph
        .graph
        .edge_weights()
        .filter(|edge| edge.length > 0.0)
        .map(|edge| edge.cost / edge.length)
        .reduce(f64::min)
        .unwrap_or(1.0)
}
