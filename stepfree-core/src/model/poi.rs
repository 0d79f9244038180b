//! Named points of interest used as routable origins and destinations

use geo::Point;
use hashbrown::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct PointOfInterest {
    pub name: String,
    /// `x` = longitude, `y` = latitude
    pub position: Point<f64>,
    pub category: Option<String>,
}

/// Name-addressable catalogue of points of interest.
///
/// Keeps insertion order so that seeded sampling is reproducible; a second
/// entry with an existing name replaces the first one in place.
#[derive(Debug, Clone, Default)]
pub struct PoiCatalog {
    points: Vec<PointOfInterest>,
    by_name: HashMap<String, usize>,
}

impl PoiCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, lat: f64, lon: f64, category: Option<String>) {
        let poi = PointOfInterest {
            name: name.into(),
            position: Point::new(lon, lat),
            category,
        };

        match self.by_name.get(&poi.name) {
            Some(&idx) => self.points[idx] = poi,
            None => {
                self.by_name.insert(poi.name.clone(), self.points.len());
                self.points.push(poi);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&PointOfInterest> {
        self.by_name.get(name).map(|&idx| &self.points[idx])
    }

    pub fn position(&self, name: &str) -> Option<Point<f64>> {
        self.get(name).map(|poi| poi.position)
    }

    pub fn category(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|poi| poi.category.as_deref())
    }

    /// Entry at a position in insertion order
    pub fn at(&self, idx: usize) -> Option<&PointOfInterest> {
        self.points.get(idx)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PointOfInterest> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl FromIterator<(String, f64, f64)> for PoiCatalog {
    fn from_iter<I: IntoIterator<Item = (String, f64, f64)>>(iter: I) -> Self {
        let mut catalog = PoiCatalog::new();
        for (name, lat, lon) in iter {
            catalog.insert(name, lat, lon, None);
        }
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_names_replace_in_place() {
        let mut catalog = PoiCatalog::new();
        catalog.insert("Library", -3.7690, -38.4780, Some("study".into()));
        catalog.insert("Gym", -3.7700, -38.4790, None);
        catalog.insert("Library", -3.7691, -38.4781, None);

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.at(0).unwrap().name, "Library");
        assert_eq!(catalog.position("Library"), Some(Point::new(-38.4781, -3.7691)));
        assert_eq!(catalog.category("Library"), None);
    }

    #[test]
    fn collects_from_tuples() {
        let catalog: PoiCatalog = vec![
            ("A".to_string(), 0.0, 0.0),
            ("B".to_string(), 0.001, 0.0),
        ]
        .into_iter()
        .collect();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.get("B").is_some());
        assert!(catalog.get("C").is_none());
    }
}
