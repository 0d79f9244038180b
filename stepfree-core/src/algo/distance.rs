//! Straight-line distances on small (campus / district sized) areas.

use geo::Point;

/// Meters per degree of latitude used by the equirectangular approximation
pub const METERS_PER_DEGREE: f64 = 111_000.0;

/// Equirectangular distance in meters between two points (`x` = lon, `y` = lat).
///
/// The longitude delta is scaled by the cosine of the latitude of `from`, so the
/// function is not exactly symmetric; callers always pass the point being
/// evaluated first and the destination second.
pub fn equirectangular_distance(from: Point<f64>, to: Point<f64>) -> f64 {
    let meters_per_degree_lon = METERS_PER_DEGREE * from.y().to_radians().cos();

    let delta_lat = (to.y() - from.y()) * METERS_PER_DEGREE;
    let delta_lon = (to.x() - from.x()) * meters_per_degree_lon;

    delta_lat.hypot(delta_lon)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_degree_of_latitude() {
        let d = equirectangular_distance(Point::new(0.0, 0.0), Point::new(0.0, 1.0));
        assert!((d - METERS_PER_DEGREE).abs() < 1e-9);
    }

    #[test]
    fn longitude_shrinks_with_latitude() {
        let at_equator = equirectangular_distance(Point::new(0.0, 0.0), Point::new(0.001, 0.0));
        let at_sixty = equirectangular_distance(Point::new(0.0, 60.0), Point::new(0.001, 60.0));
        assert!((at_sixty - at_equator / 2.0).abs() < 1e-6);
    }

    #[test]
    fn zero_for_identical_points() {
        let p = Point::new(-38.4781, -3.7684);
        assert_eq!(equirectangular_distance(p, p), 0.0);
    }
}
