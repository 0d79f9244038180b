//! Seeded origin/destination sampling and distance classes

use std::fmt;

use geo::Point;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::equirectangular_distance;
use crate::model::{PoiCatalog, PointOfInterest};

/// Upper bound (exclusive) of the short class, meters
pub const SHORT_LIMIT_M: f64 = 200.0;
/// Upper bound (exclusive) of the medium class, meters
pub const MEDIUM_LIMIT_M: f64 = 500.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceCategory {
    Short,
    Medium,
    Long,
}

impl DistanceCategory {
    pub const ALL: [DistanceCategory; 3] = [
        DistanceCategory::Short,
        DistanceCategory::Medium,
        DistanceCategory::Long,
    ];

    pub fn from_meters(meters: f64) -> Self {
        if meters < SHORT_LIMIT_M {
            DistanceCategory::Short
        } else if meters < MEDIUM_LIMIT_M {
            DistanceCategory::Medium
        } else {
            DistanceCategory::Long
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DistanceCategory::Short => "short",
            DistanceCategory::Medium => "medium",
            DistanceCategory::Long => "long",
        }
    }
}

impl fmt::Display for DistanceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Straight-line origin to destination distance in meters
pub fn straight_line_distance(origin: Point<f64>, destination: Point<f64>) -> f64 {
    equirectangular_distance(origin, destination)
}

/// Draws ordered pairs of distinct points of interest from an explicit
/// seeded generator
#[derive(Debug, Clone)]
pub struct PairSampler {
    rng: StdRng,
}

impl PairSampler {
    pub fn new(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    pub fn from_rng(rng: StdRng) -> Self {
        Self { rng }
    }

    /// Two distinct entries chosen uniformly, `None` with fewer than two entries
    pub fn draw<'a>(
        &mut self,
        catalog: &'a PoiCatalog,
    ) -> Option<(&'a PointOfInterest, &'a PointOfInterest)> {
        if catalog.len() < 2 {
            return None;
        }
        let picked = rand::seq::index::sample(&mut self.rng, catalog.len(), 2);
        Some((catalog.at(picked.index(0))?, catalog.at(picked.index(1))?))
    }
}
