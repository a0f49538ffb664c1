//! Geodesic distance on the WGS-84 ellipsoid.
//!
//! Uses Karney's inverse solver, which converges for every pair of points,
//! antipodal ones included, so one model covers all call sites.

use geographiclib_rs::{Geodesic, InverseGeodesic};
use crate::models::coordinate::Coordinate;

/// Distance between two coordinates in kilometres, rounded to 2 decimals.
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    // Solving always in the same direction keeps the result exactly symmetric.
    let (from, to) = canonical_order(a, b);
    let meters: f64 = Geodesic::wgs84().inverse(from.lat(), from.lng(), to.lat(), to.lng());

    round_2dp(meters / 1000.0)
}

fn canonical_order(a: Coordinate, b: Coordinate) -> (Coordinate, Coordinate) {
    if (a.lat(), a.lng()) <= (b.lat(), b.lng()) {
        (a, b)
    } else {
        (b, a)
    }
}

fn round_2dp(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng).unwrap()
    }

    #[test]
    fn same_point_is_zero() {
        let points = [coord(0.0, 0.0), coord(40.7128, -74.006), coord(-33.86, 151.2), coord(90.0, 0.0)];
        for point in points {
            assert_eq!(distance_km(point, point), 0.0);
        }
    }

    #[test]
    fn distance_is_symmetric() {
        let points = [
            coord(40.7128, -74.006),
            coord(51.5074, -0.1278),
            coord(-33.8688, 151.2093),
            coord(1.3521, 103.8198),
            coord(0.0, 179.9),
            coord(0.0, -179.9),
            coord(-89.5, 45.0),
        ];
        for a in points {
            for b in points {
                assert_eq!(distance_km(a, b), distance_km(b, a));
            }
        }
    }

    #[test]
    fn one_degree_along_meridian_and_equator() {
        // WGS-84 reference values: 110.574 km and 111.319 km.
        assert!((distance_km(coord(0.0, 0.0), coord(1.0, 0.0)) - 110.57).abs() < 0.011);
        assert!((distance_km(coord(0.0, 0.0), coord(0.0, 1.0)) - 111.32).abs() < 0.011);
    }

    #[test]
    fn crosses_antimeridian_the_short_way() {
        let d = distance_km(coord(0.0, 179.5), coord(0.0, -179.5));
        assert!((d - 111.32).abs() < 0.011, "got {}", d);
    }

    #[test]
    fn antipodal_points_on_the_equator_follow_the_meridian() {
        // Half a meridian on WGS-84: 20003.93 km.
        let d = distance_km(coord(0.0, 0.0), coord(0.0, 180.0));
        assert!((d - 20_003.93).abs() < 0.011, "got {}", d);
    }

    #[test]
    fn nearly_antipodal_points_still_produce_a_distance() {
        let d = distance_km(coord(0.0, 0.0), coord(0.5, 179.7));
        assert!(d > 19_800.0 && d < 20_040.0, "got {}", d);
    }

    #[test]
    fn result_is_rounded_to_two_decimals() {
        let d = distance_km(coord(40.7128, -74.006), coord(40.7306, -73.9352));
        assert_eq!(d, (d * 100.0).round() / 100.0);
        assert!(d > 5.9 && d < 6.7, "got {}", d);
    }
}
