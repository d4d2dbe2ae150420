//! Great-circle distance
//!
//! All distances in this crate are in miles.

use crate::constants::geo::EARTH_RADIUS_MILES;
use crate::geo::Coordinates;

/// Calculate the distance between two points in miles (Haversine formula)
pub fn haversine_miles(p1: Coordinates, p2: Coordinates) -> f64 {
    let lat1 = p1.lat.to_radians();
    let lat2 = p2.lat.to_radians();
    let delta_lat = (p2.lat - p1.lat).to_radians();
    let delta_lng = (p2.lng - p1.lng).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_MILES * c
}

/// Check if a point lies within `radius_miles` of `center` (boundary inclusive)
pub fn is_within(point: Coordinates, center: Coordinates, radius_miles: f64) -> bool {
    haversine_miles(point, center) <= radius_miles
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_same_point_is_zero() {
        let p = Coordinates::new(39.9526, -75.1652);
        assert_eq!(haversine_miles(p, p), 0.0);
    }

    #[test]
    fn test_symmetric() {
        let a = Coordinates::new(39.9526, -75.1652);
        let b = Coordinates::new(40.0765, -75.2077);
        assert_relative_eq!(haversine_miles(a, b), haversine_miles(b, a), epsilon = 1e-12);
    }

    #[test]
    fn test_one_degree_latitude() {
        // One degree of latitude is roughly 69 miles
        let a = Coordinates::new(40.0, -75.0);
        let b = Coordinates::new(41.0, -75.0);
        assert_relative_eq!(haversine_miles(a, b), 69.09, epsilon = 0.05);
    }

    #[test]
    fn test_philadelphia_to_new_york() {
        // City Hall to Manhattan is about 80 miles as the crow flies
        let philly = Coordinates::new(39.9526, -75.1652);
        let nyc = Coordinates::new(40.7128, -74.0060);
        let d = haversine_miles(philly, nyc);
        assert!(d > 75.0 && d < 85.0, "expected ~80 miles, got {}", d);
    }

    #[test]
    fn test_is_within() {
        let center = Coordinates::new(39.9526, -75.1652);
        assert!(is_within(center, center, 0.0));
        // ~0.69 miles north
        assert!(is_within(Coordinates::new(39.9626, -75.1652), center, 1.0));
        // ~6.9 miles north
        assert!(!is_within(Coordinates::new(40.0526, -75.1652), center, 1.0));
    }
}
