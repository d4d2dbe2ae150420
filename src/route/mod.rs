//! Route ordering within a cluster
//!
//! Greedy nearest-neighbor ordering: start at the stop closest to the
//! cluster centroid, then always drive to the closest stop not yet visited.
//! O(n^2), not optimal, but deterministic for a given input order.

use crate::cluster::{AddressCluster, CustomerAddress};
use crate::constants::url::STOP_SEPARATOR;
use crate::geo::distance::haversine_miles;
use crate::geo::Coordinates;
use serde::{Deserialize, Serialize};

/// Order a cluster's addresses into a visiting sequence
///
/// Returns a permutation of `cluster.addresses`. Exact distance ties go to
/// whichever candidate comes first in the remaining list.
pub fn optimize_route(cluster: &AddressCluster) -> Vec<CustomerAddress> {
    if cluster.addresses.len() <= 1 {
        return cluster.addresses.clone();
    }

    let mut remaining = cluster.addresses.clone();
    let mut route = Vec::with_capacity(remaining.len());

    let start = nearest_index(&remaining, cluster.centroid);
    let mut current = remaining.remove(start);

    while !remaining.is_empty() {
        let next = nearest_index(&remaining, current.coordinates);
        let stop = remaining.remove(next);
        route.push(current);
        current = stop;
    }
    route.push(current);

    route
}

/// Index of the address closest to `from`, first wins on ties
///
/// `candidates` must be non-empty.
fn nearest_index(candidates: &[CustomerAddress], from: Coordinates) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (i, candidate) in candidates.iter().enumerate() {
        let distance = haversine_miles(from, candidate.coordinates);
        if distance < best_distance {
            best = i;
            best_distance = distance;
        }
    }
    best
}

/// Total driving distance (straight-line legs) along a stop sequence
pub fn route_distance_miles(stops: &[CustomerAddress]) -> f64 {
    stops
        .windows(2)
        .map(|pair| haversine_miles(pair[0].coordinates, pair[1].coordinates))
        .sum()
}

/// One stop in a planned route
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteStop {
    /// 1-based position in the route
    pub order: usize,
    /// Distance from the previous stop (0 for the first)
    pub leg_miles: f64,
    #[serde(flatten)]
    pub address: CustomerAddress,
}

/// An optimized route for one cluster
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutePlan {
    pub cluster_id: String,
    pub cluster_name: String,
    pub stops: Vec<RouteStop>,
    pub total_distance_miles: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directions_url: Option<String>,
}

/// Optimize a cluster and annotate the result with legs and a map link
///
/// # Arguments
/// * `cluster` - The cluster to route
/// * `directions_template` - Map URL template containing `{stops}`
pub fn plan_route(cluster: &AddressCluster, directions_template: &str) -> RoutePlan {
    let ordered = optimize_route(cluster);
    let total_distance_miles = route_distance_miles(&ordered);
    let directions_url = directions_url(directions_template, &ordered);

    let mut previous: Option<Coordinates> = None;
    let stops = ordered
        .into_iter()
        .enumerate()
        .map(|(i, address)| {
            let leg_miles = previous
                .map(|p| haversine_miles(p, address.coordinates))
                .unwrap_or(0.0);
            previous = Some(address.coordinates);
            RouteStop {
                order: i + 1,
                leg_miles,
                address,
            }
        })
        .collect();

    RoutePlan {
        cluster_id: cluster.id.clone(),
        cluster_name: cluster.name.clone(),
        stops,
        total_distance_miles,
        directions_url,
    }
}

/// Build a multi-stop directions link
///
/// Replaces `{stops}` in `template` with the URL-encoded addresses joined
/// by `/`. Returns None when there are no stops.
pub fn directions_url(template: &str, stops: &[CustomerAddress]) -> Option<String> {
    if stops.is_empty() {
        return None;
    }
    let joined = stops
        .iter()
        .map(|s| urlencoding::encode(&s.address).into_owned())
        .collect::<Vec<_>>()
        .join(STOP_SEPARATOR);
    Some(template.replace("{stops}", &joined))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::builder::centroid;
    use crate::cluster::{ClusterStatus, SubscriptionType};
    use crate::constants::url::GOOGLE_DIRECTIONS;
    use approx::assert_relative_eq;

    fn stop(id: i64, address: &str, lat: f64, lng: f64) -> CustomerAddress {
        CustomerAddress {
            customer_id: id,
            username: format!("user{}", id),
            email: format!("user{}@example.com", id),
            address: address.to_string(),
            coordinates: Coordinates::new(lat, lng),
            subscription_type: SubscriptionType::Active,
            bag_count: 1,
            last_pickup: None,
        }
    }

    fn cluster(addresses: Vec<CustomerAddress>) -> AddressCluster {
        AddressCluster {
            id: "test".to_string(),
            name: "Test".to_string(),
            centroid: centroid(&addresses),
            total_customers: addresses.len(),
            estimated_revenue: addresses.len() as u64 * 5,
            addresses,
            status: ClusterStatus::Available,
            last_pickup_date: None,
        }
    }

    fn ids(route: &[CustomerAddress]) -> Vec<i64> {
        route.iter().map(|a| a.customer_id).collect()
    }

    #[test]
    fn test_empty_and_single() {
        assert!(optimize_route(&cluster(vec![])).is_empty());

        let single = cluster(vec![stop(1, "A", 40.0, -75.0)]);
        assert_eq!(ids(&optimize_route(&single)), vec![1]);
    }

    #[test]
    fn test_triangle() {
        // Centroid is (40.0, -75.0), exactly on B
        let a = stop(1, "A", 40.0, -75.5);
        let b = stop(2, "B", 40.0, -75.0);
        let c = stop(3, "C", 40.0, -74.5);
        let triangle = cluster(vec![a.clone(), b.clone(), c.clone()]);

        let route = optimize_route(&triangle);

        // Start is the stop nearest the centroid
        let start_distances: Vec<f64> = [&a, &b, &c]
            .iter()
            .map(|s| haversine_miles(triangle.centroid, s.coordinates))
            .collect();
        let nearest = start_distances
            .iter()
            .enumerate()
            .min_by(|x, y| x.1.partial_cmp(y.1).unwrap())
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(route[0].customer_id, [1, 2, 3][nearest]);
        assert_eq!(route[0].customer_id, 2);

        // From B, A and C are equidistant: A comes first in remaining order
        assert_eq!(
            haversine_miles(b.coordinates, a.coordinates),
            haversine_miles(b.coordinates, c.coordinates)
        );
        assert_eq!(ids(&route), vec![2, 1, 3]);
    }

    #[test]
    fn test_scalene_triangle_each_leg_nearest() {
        let stops = vec![
            stop(1, "A", 40.00, -75.00),
            stop(2, "B", 40.05, -75.00),
            stop(3, "C", 40.01, -75.02),
        ];
        let triangle = cluster(stops.clone());
        let route = optimize_route(&triangle);

        // Each next stop is the nearest of those not yet visited
        let mut visited = vec![route[0].customer_id];
        for pair in route.windows(2) {
            let from = pair[0].coordinates;
            let chosen = haversine_miles(from, pair[1].coordinates);
            for candidate in stops.iter().filter(|s| !visited.contains(&s.customer_id)) {
                assert!(chosen <= haversine_miles(from, candidate.coordinates));
            }
            visited.push(pair[1].customer_id);
        }

        // Centroid (40.02, -75.00667): C is closest
        assert_eq!(ids(&route), vec![3, 1, 2]);
    }

    #[test]
    fn test_duplicate_coordinates_keep_input_order() {
        let stops = vec![
            stop(1, "Same", 40.0, -75.0),
            stop(2, "Same", 40.0, -75.0),
            stop(3, "Same", 40.0, -75.0),
        ];
        let route = optimize_route(&cluster(stops));
        assert_eq!(ids(&route), vec![1, 2, 3]);
    }

    #[test]
    fn test_route_is_permutation() {
        let stops: Vec<CustomerAddress> = (0..25)
            .map(|i| {
                let f = i as f64;
                stop(i, &format!("{} Spruce St", i), 39.9 + (f * 0.37) % 0.3, -75.2 + (f * 0.53) % 0.4)
            })
            .collect();
        let route = optimize_route(&cluster(stops.clone()));

        assert_eq!(route.len(), stops.len());
        let mut got = ids(&route);
        got.sort();
        let mut expected = ids(&stops);
        expected.sort();
        assert_eq!(got, expected);
    }

    #[test]
    fn test_route_distance() {
        let stops = vec![
            stop(1, "A", 40.0, -75.0),
            stop(2, "B", 41.0, -75.0),
            stop(3, "C", 42.0, -75.0),
        ];
        let expected = haversine_miles(stops[0].coordinates, stops[1].coordinates)
            + haversine_miles(stops[1].coordinates, stops[2].coordinates);
        assert_relative_eq!(route_distance_miles(&stops), expected);
        assert_eq!(route_distance_miles(&stops[..1]), 0.0);
    }

    #[test]
    fn test_plan_route() {
        let stops = vec![
            stop(1, "10 Oak Ln", 40.00, -75.00),
            stop(2, "20 Oak Ln", 40.05, -75.00),
            stop(3, "30 Oak Ln", 40.01, -75.02),
        ];
        let plan = plan_route(&cluster(stops), GOOGLE_DIRECTIONS);

        assert_eq!(plan.cluster_id, "test");
        let orders: Vec<usize> = plan.stops.iter().map(|s| s.order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
        assert_eq!(plan.stops[0].leg_miles, 0.0);

        let legs: f64 = plan.stops.iter().map(|s| s.leg_miles).sum();
        assert_relative_eq!(legs, plan.total_distance_miles, epsilon = 1e-9);

        assert_eq!(
            plan.directions_url.as_deref(),
            Some("https://www.google.com/maps/dir/30%20Oak%20Ln/10%20Oak%20Ln/20%20Oak%20Ln")
        );
    }

    #[test]
    fn test_directions_url_empty() {
        assert!(directions_url(GOOGLE_DIRECTIONS, &[]).is_none());
    }

    #[test]
    fn test_directions_url_encodes() {
        let stops = vec![stop(1, "1234 Market St, Philadelphia, PA", 40.0, -75.0)];
        let url = directions_url(GOOGLE_DIRECTIONS, &stops).unwrap();
        assert_eq!(
            url,
            "https://www.google.com/maps/dir/1234%20Market%20St%2C%20Philadelphia%2C%20PA"
        );
    }

    #[test]
    fn test_route_stop_serializes_flat() {
        let plan = plan_route(&cluster(vec![stop(1, "A", 40.0, -75.0)]), GOOGLE_DIRECTIONS);
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["clusterId"], "test");
        assert_eq!(json["stops"][0]["order"], 1);
        assert_eq!(json["stops"][0]["customerId"], 1);
        assert_eq!(json["stops"][0]["address"], "A");
    }
}
