//! Street network components - nodes, edges and their accessibility tags

use geo::{LineString, Point};
use serde::{Deserialize, Serialize};

use crate::{Cost, NodeId};

/// `crossing=*` values that denote a marked pedestrian crossing
const MARKED_CROSSINGS: [&str; 4] = ["yes", "marked", "zebra", "traffic_signals"];

/// Street graph node
#[derive(Debug, Clone)]
pub struct StreetNode {
    /// OSM ID of the node
    pub id: NodeId,
    /// Node coordinates (`x` = longitude, `y` = latitude)
    pub geometry: Point<f64>,
    /// Raw `crossing=*` tag
    pub crossing: Option<String>,
    /// Raw `highway=*` tag
    pub highway: Option<String>,
}

impl StreetNode {
    pub fn new(id: NodeId, lat: f64, lon: f64) -> Self {
        Self {
            id,
            geometry: Point::new(lon, lat),
            crossing: None,
            highway: None,
        }
    }

    pub fn lat(&self) -> f64 {
        self.geometry.y()
    }

    pub fn lon(&self) -> f64 {
        self.geometry.x()
    }

    /// Whether the node is a marked pedestrian crossing
    /// (`crossing` = yes/marked/zebra/traffic_signals, or `highway=crossing`)
    pub fn is_marked_crossing(&self) -> bool {
        self.crossing
            .as_deref()
            .is_some_and(|c| MARKED_CROSSINGS.contains(&c))
            || self.highway.as_deref() == Some("crossing")
    }
}

/// Untyped tag value as handed over by the graph supplier.
///
/// OSM-derived sources give numbers for some ways and strings such as `"8%"`
/// or `"1.2 m"` for others.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTag {
    Number(f64),
    Text(String),
}

impl From<f64> for RawTag {
    fn from(value: f64) -> Self {
        RawTag::Number(value)
    }
}

impl From<&str> for RawTag {
    fn from(value: &str) -> Self {
        RawTag::Text(value.to_string())
    }
}

/// Accessibility-relevant tags of a street segment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeTags {
    /// `wheelchair=*` (`no`, `limited`, ...)
    #[serde(default)]
    pub wheelchair: Option<String>,
    /// `highway=*` subtype (`footway`, `steps`, ...)
    #[serde(default)]
    pub highway: Option<String>,
    /// Signed incline in percent
    #[serde(default)]
    pub incline: Option<RawTag>,
    /// `ramp=*`
    #[serde(default)]
    pub ramp: Option<String>,
    /// `surface=*`
    #[serde(default)]
    pub surface: Option<String>,
    /// Physical width in meters
    #[serde(default)]
    pub width: Option<RawTag>,
}

/// Street graph edge (street segment)
#[derive(Debug, Clone)]
pub struct StreetEdge {
    /// Disambiguates parallel edges between the same pair of nodes
    pub key: u32,
    /// Physical length in meters
    pub length: f64,
    /// Current traversal cost, rewritten by the weighting module
    pub(crate) cost: Cost,
    /// Cost before the first weighting pass; never overwritten once set
    pub(crate) original_cost: Option<Cost>,
    pub tags: EdgeTags,
    /// Optional geometry for route extraction
    pub geometry: Option<LineString<f64>>,
}

impl StreetEdge {
    pub fn new(length: f64) -> Self {
        Self {
            key: 0,
            length,
            cost: length,
            original_cost: None,
            tags: EdgeTags::default(),
            geometry: None,
        }
    }

    #[must_use]
    pub fn with_key(mut self, key: u32) -> Self {
        self.key = key;
        self
    }

    #[must_use]
    pub fn with_tags(mut self, tags: EdgeTags) -> Self {
        self.tags = tags;
        self
    }

    #[must_use]
    pub fn with_geometry(mut self, geometry: LineString<f64>) -> Self {
        self.geometry = Some(geometry);
        self
    }

    pub fn cost(&self) -> Cost {
        self.cost
    }

    pub fn original_cost(&self) -> Option<Cost> {
        self.original_cost
    }
}
