//! Neighborhood registry and matcher
//!
//! A fixed, ordered table of named regions. Registry order is significant:
//! when two regions are exactly equidistant the earlier one wins.

use crate::geo::distance::haversine_miles;
use crate::geo::Coordinates;
use serde::Serialize;

/// Name used for addresses that fall inside no registered region
pub const OTHER_AREAS: &str = "Other Areas";

/// A named circular region
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Neighborhood {
    pub name: &'static str,
    pub center: Coordinates,
    pub radius_miles: f64,
}

impl Neighborhood {
    pub const fn new(name: &'static str, lat: f64, lng: f64, radius_miles: f64) -> Self {
        Self {
            name,
            center: Coordinates::new(lat, lng),
            radius_miles,
        }
    }
}

/// Built-in Philadelphia neighborhoods
pub const REGISTRY: &[Neighborhood] = &[
    Neighborhood::new("Center City", 39.9526, -75.1652, 1.5),
    Neighborhood::new("Old City", 39.9496, -75.1448, 0.8),
    Neighborhood::new("Northern Liberties", 39.9656, -75.1404, 1.0),
    Neighborhood::new("Fishtown", 39.9712, -75.1340, 1.2),
    Neighborhood::new("South Philadelphia", 39.9250, -75.1700, 2.0),
    Neighborhood::new("University City", 39.9522, -75.1932, 1.5),
    Neighborhood::new("Manayunk", 40.0262, -75.2249, 1.5),
    Neighborhood::new("Chestnut Hill", 40.0765, -75.2077, 2.0),
    Neighborhood::new("Germantown", 40.0376, -75.1738, 2.0),
    Neighborhood::new("Northeast Philadelphia", 40.0843, -75.0408, 4.0),
];

/// Match a coordinate against the built-in registry
pub fn match_neighborhood(coords: Coordinates) -> &'static str {
    match_in(REGISTRY, coords)
}

/// Match a coordinate against any registry
///
/// Returns the name of the closest region whose radius contains the point,
/// or [`OTHER_AREAS`] when none does.
pub fn match_in<'a>(registry: &'a [Neighborhood], coords: Coordinates) -> &'a str {
    let mut best: Option<(&'a str, f64)> = None;

    for region in registry {
        let distance = haversine_miles(coords, region.center);
        if distance > region.radius_miles {
            continue;
        }
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((region.name, distance)),
        }
    }

    best.map(|(name, _)| name).unwrap_or(OTHER_AREAS)
}

/// Cluster id for a neighborhood name: lowercase, spaces to underscores
pub fn slugify(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_order_and_size() {
        assert_eq!(REGISTRY.len(), 10);
        assert_eq!(REGISTRY[0].name, "Center City");
        assert_eq!(REGISTRY[9].name, "Northeast Philadelphia");
    }

    #[test]
    fn test_single_region_match() {
        // Chestnut Hill's center lies inside no other region
        let coords = Coordinates::new(40.0765, -75.2077);
        let containing: Vec<_> = REGISTRY
            .iter()
            .filter(|r| haversine_miles(coords, r.center) <= r.radius_miles)
            .collect();
        assert_eq!(containing.len(), 1);
        assert_eq!(match_neighborhood(coords), "Chestnut Hill");
    }

    #[test]
    fn test_no_region_is_other_areas() {
        let coords = Coordinates::new(39.81, -75.79);
        assert_eq!(match_neighborhood(coords), OTHER_AREAS);
    }

    #[test]
    fn test_closest_overlapping_region_wins() {
        // University City's center is also within Center City's radius
        let coords = Coordinates::new(39.9522, -75.1932);
        assert_eq!(match_neighborhood(coords), "University City");
    }

    #[test]
    fn test_exact_tie_keeps_registry_order() {
        let registry = [
            Neighborhood::new("First", 40.0, -75.0, 1.0),
            Neighborhood::new("Second", 40.0, -75.0, 1.0),
        ];
        assert_eq!(match_in(&registry, Coordinates::new(40.001, -75.0)), "First");
    }

    #[test]
    fn test_radius_boundary_inclusive() {
        let center = Coordinates::new(40.0, -75.0);
        let point = Coordinates::new(40.01, -75.0);
        let radius = haversine_miles(point, center);
        let registry = [Neighborhood::new("Edge", 40.0, -75.0, radius)];
        assert_eq!(match_in(&registry, point), "Edge");
    }

    #[test]
    fn test_empty_registry() {
        assert_eq!(match_in(&[], Coordinates::new(40.0, -75.0)), OTHER_AREAS);
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Center City"), "center_city");
        assert_eq!(slugify(OTHER_AREAS), "other_areas");
        assert_eq!(slugify("Northeast Philadelphia"), "northeast_philadelphia");
    }
}
