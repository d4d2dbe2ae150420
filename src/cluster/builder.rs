//! Neighborhood cluster builder
//!
//! Geocodes customers, buckets them by neighborhood and aggregates each
//! bucket into an `AddressCluster`.

use crate::cluster::enrich::PickupEnricher;
use crate::cluster::{
    AddressCluster, ClusterPolicy, ClusterStatus, Customer, CustomerAddress, SubscriptionType,
};
use crate::geo::neighborhood::{match_neighborhood, slugify};
use crate::geo::{AddressGeocoder, Coordinates};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use tracing::debug;

/// Build neighborhood clusters for a customer list
///
/// # Arguments
/// * `customers` - Raw customer records; those without a usable address are skipped
/// * `geocoder` - Address to coordinate mapping
/// * `enricher` - Source of bag counts and last pickup times
/// * `policy` - Revenue and recency rules
/// * `now` - Reference time for the recent-pickup window
///
/// # Returns
/// Non-empty clusters, largest first. Clusters of equal size keep the order
/// in which their neighborhood first appeared in the input.
pub fn build_clusters(
    customers: &[Customer],
    geocoder: &dyn AddressGeocoder,
    enricher: &dyn PickupEnricher,
    policy: ClusterPolicy,
    now: DateTime<Utc>,
) -> Vec<AddressCluster> {
    let mut buckets: Vec<(&'static str, Vec<CustomerAddress>)> = Vec::new();
    let mut bucket_index: HashMap<&'static str, usize> = HashMap::new();

    for customer in customers {
        let Some(address) = customer.usable_address() else {
            debug!("Skipping customer {} with no address", customer.id);
            continue;
        };

        let entry = customer_address(customer, address, geocoder, enricher, now);
        let neighborhood = match_neighborhood(entry.coordinates);

        let index = *bucket_index.entry(neighborhood).or_insert_with(|| {
            buckets.push((neighborhood, Vec::new()));
            buckets.len() - 1
        });
        buckets[index].1.push(entry);
    }

    let mut clusters: Vec<AddressCluster> = buckets
        .into_iter()
        .map(|(name, addresses)| aggregate(name, addresses, policy, now))
        .collect();

    // sort_by is stable
    clusters.sort_by(|a, b| b.total_customers.cmp(&a.total_customers));
    clusters
}

fn customer_address(
    customer: &Customer,
    address: &str,
    geocoder: &dyn AddressGeocoder,
    enricher: &dyn PickupEnricher,
    now: DateTime<Utc>,
) -> CustomerAddress {
    let details = enricher.enrich(customer, now);
    CustomerAddress {
        customer_id: customer.id,
        username: customer.username.clone(),
        email: customer.email.clone(),
        address: address.to_string(),
        coordinates: geocoder.geocode(address),
        subscription_type: SubscriptionType::Active,
        bag_count: details.bag_count,
        last_pickup: details.last_pickup,
    }
}

/// Aggregate one non-empty bucket
fn aggregate(
    name: &str,
    mut addresses: Vec<CustomerAddress>,
    policy: ClusterPolicy,
    now: DateTime<Utc>,
) -> AddressCluster {
    addresses.sort_by(|a, b| a.address.cmp(&b.address));

    let centroid = centroid(&addresses);
    let total_customers = addresses.len();

    let cutoff = recent_cutoff(now, policy.recent_pickup_days);
    let recently_picked_up = addresses
        .iter()
        .any(|a| a.last_pickup.is_some_and(|t| cutoff.map_or(true, |c| t > c)));

    let (status, last_pickup_date) = if recently_picked_up {
        let latest = addresses.iter().filter_map(|a| a.last_pickup).max();
        (ClusterStatus::Completed, latest)
    } else {
        (ClusterStatus::Available, None)
    };

    debug!(
        "Cluster {}: {} customers, status {}",
        name, total_customers, status
    );

    AddressCluster {
        id: slugify(name),
        name: name.to_string(),
        addresses,
        centroid,
        total_customers,
        estimated_revenue: (total_customers as u64).saturating_mul(policy.revenue_per_customer),
        status,
        last_pickup_date,
    }
}

/// Start of the recent-pickup window
///
/// None when the window reaches past the representable time range, in which
/// case every recorded pickup counts as recent.
fn recent_cutoff(now: DateTime<Utc>, days: i64) -> Option<DateTime<Utc>> {
    Duration::try_days(days).and_then(|window| now.checked_sub_signed(window))
}

/// Arithmetic mean of member coordinates
pub fn centroid(addresses: &[CustomerAddress]) -> Coordinates {
    if addresses.is_empty() {
        return Coordinates::new(0.0, 0.0);
    }
    let n = addresses.len() as f64;
    let (lat_sum, lng_sum) = addresses.iter().fold((0.0, 0.0), |(lat, lng), a| {
        (lat + a.coordinates.lat, lng + a.coordinates.lng)
    });
    Coordinates::new(lat_sum / n, lng_sum / n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::enrich::{FixedEnricher, PickupDetails, SeededEnricher};
    use crate::geo::hash::HashGeocoder;
    use crate::geo::neighborhood::OTHER_AREAS;
    use approx::assert_relative_eq;
    use chrono::TimeZone;
    use std::collections::HashSet;

    /// Geocoder returning preset coordinates keyed by address
    struct TableGeocoder(HashMap<&'static str, Coordinates>);

    impl AddressGeocoder for TableGeocoder {
        fn name(&self) -> &'static str {
            "table"
        }
        fn description(&self) -> &'static str {
            "test table"
        }
        fn geocode(&self, address: &str) -> Coordinates {
            self.0
                .get(address)
                .copied()
                .unwrap_or(Coordinates::new(0.0, 0.0))
        }
    }

    /// Enricher that reports a pickup only for one customer id
    struct PickupFor {
        customer_id: i64,
        at: DateTime<Utc>,
    }

    impl PickupEnricher for PickupFor {
        fn name(&self) -> &'static str {
            "pickup-for"
        }
        fn description(&self) -> &'static str {
            "test enricher"
        }
        fn enrich(&self, customer: &Customer, _now: DateTime<Utc>) -> PickupDetails {
            PickupDetails {
                bag_count: 1,
                last_pickup: (customer.id == self.customer_id).then_some(self.at),
            }
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn customer(id: i64, address: &str) -> Customer {
        Customer {
            id,
            username: format!("user{}", id),
            email: format!("user{}@example.com", id),
            address: Some(address.to_string()),
        }
    }

    fn build(customers: &[Customer], geocoder: &dyn AddressGeocoder) -> Vec<AddressCluster> {
        build_clusters(
            customers,
            geocoder,
            &FixedEnricher::default(),
            ClusterPolicy::default(),
            now(),
        )
    }

    fn philly_table() -> TableGeocoder {
        TableGeocoder(HashMap::from([
            ("100 Chestnut Hill Ave", Coordinates::new(40.0765, -75.2077)),
            ("200 Chestnut Hill Ave", Coordinates::new(40.0775, -75.2067)),
            ("1 Penn Square", Coordinates::new(39.9526, -75.1652)),
            ("9 Farm Road", Coordinates::new(39.81, -75.79)),
            ("7 Farm Road", Coordinates::new(39.82, -75.78)),
            ("5 Farm Road", Coordinates::new(39.83, -75.77)),
        ]))
    }

    #[test]
    fn test_empty_input() {
        assert!(build(&[], &HashGeocoder).is_empty());
    }

    #[test]
    fn test_same_address_shares_cluster() {
        let address = "1234 Market Street, Philadelphia, PA 19107";
        let customers = vec![customer(1, address), customer(2, address)];
        let clusters = build(&customers, &HashGeocoder);

        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].total_customers, 2);
        assert_eq!(clusters[0].estimated_revenue, 10);
        assert_eq!(
            clusters[0].addresses[0].coordinates,
            clusters[0].addresses[1].coordinates
        );
    }

    #[test]
    fn test_blank_address_excluded() {
        let mut customers = vec![customer(1, "1 Penn Square"), customer(2, "")];
        customers.push(Customer {
            id: 3,
            username: "nobody".to_string(),
            email: "nobody@example.com".to_string(),
            address: None,
        });
        let clusters = build(&customers, &philly_table());

        let ids: Vec<i64> = clusters
            .iter()
            .flat_map(|c| c.addresses.iter().map(|a| a.customer_id))
            .collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn test_partition_invariant() {
        let customers: Vec<Customer> = (0..50)
            .map(|i| customer(i, &format!("{} Walnut Street, Philadelphia", i * 17)))
            .chain(std::iter::once(customer(99, "")))
            .collect();
        let clusters = build(&customers, &HashGeocoder);

        let mut seen = HashSet::new();
        for cluster in &clusters {
            assert!(!cluster.addresses.is_empty());
            for a in &cluster.addresses {
                assert!(seen.insert(a.customer_id), "customer {} duplicated", a.customer_id);
            }
        }
        let expected: HashSet<i64> = (0..50).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_centroid_is_mean() {
        let customers = vec![
            customer(1, "9 Farm Road"),
            customer(2, "7 Farm Road"),
            customer(3, "5 Farm Road"),
        ];
        let clusters = build(&customers, &philly_table());

        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].name, OTHER_AREAS);
        assert_eq!(clusters[0].id, "other_areas");
        assert_relative_eq!(clusters[0].centroid.lat, 39.82, epsilon = 1e-9);
        assert_relative_eq!(clusters[0].centroid.lng, -75.78, epsilon = 1e-9);
    }

    #[test]
    fn test_members_sorted_by_address() {
        let customers = vec![
            customer(1, "9 Farm Road"),
            customer(2, "5 Farm Road"),
            customer(3, "7 Farm Road"),
        ];
        let clusters = build(&customers, &philly_table());
        let addresses: Vec<&str> = clusters[0]
            .addresses
            .iter()
            .map(|a| a.address.as_str())
            .collect();
        assert_eq!(addresses, vec!["5 Farm Road", "7 Farm Road", "9 Farm Road"]);
    }

    #[test]
    fn test_clusters_sorted_by_size_with_stable_ties() {
        let customers = vec![
            customer(1, "1 Penn Square"),
            customer(2, "9 Farm Road"),
            customer(3, "100 Chestnut Hill Ave"),
            customer(4, "7 Farm Road"),
            customer(5, "200 Chestnut Hill Ave"),
            customer(6, "5 Farm Road"),
        ];
        let clusters = build(&customers, &philly_table());
        let names: Vec<&str> = clusters.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec![OTHER_AREAS, "Chestnut Hill", "Center City"]);

        // Equal sizes keep first-appearance order
        let customers = vec![
            customer(1, "100 Chestnut Hill Ave"),
            customer(2, "1 Penn Square"),
        ];
        let clusters = build(&customers, &philly_table());
        let names: Vec<&str> = clusters.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Chestnut Hill", "Center City"]);
    }

    #[test]
    fn test_recent_pickup_marks_completed() {
        let picked_up = now() - Duration::days(1);
        let customers = vec![
            customer(1, "100 Chestnut Hill Ave"),
            customer(2, "200 Chestnut Hill Ave"),
            customer(3, "1 Penn Square"),
        ];
        let enricher = PickupFor {
            customer_id: 2,
            at: picked_up,
        };
        let clusters = build_clusters(
            &customers,
            &philly_table(),
            &enricher,
            ClusterPolicy::default(),
            now(),
        );

        let chestnut = clusters.iter().find(|c| c.name == "Chestnut Hill").unwrap();
        assert_eq!(chestnut.status, ClusterStatus::Completed);
        assert_eq!(chestnut.last_pickup_date, Some(picked_up));

        let center = clusters.iter().find(|c| c.name == "Center City").unwrap();
        assert_eq!(center.status, ClusterStatus::Available);
        assert_eq!(center.last_pickup_date, None);
    }

    #[test]
    fn test_old_pickup_stays_available() {
        let enricher = FixedEnricher::new(1, Some(now() - Duration::days(4)));
        let clusters = build_clusters(
            &[customer(1, "1 Penn Square")],
            &philly_table(),
            &enricher,
            ClusterPolicy::default(),
            now(),
        );
        assert_eq!(clusters[0].status, ClusterStatus::Available);
        assert!(clusters[0].last_pickup_date.is_none());
    }

    #[test]
    fn test_custom_policy() {
        let policy = ClusterPolicy {
            revenue_per_customer: 8,
            recent_pickup_days: 7,
        };
        let enricher = FixedEnricher::new(1, Some(now() - Duration::days(5)));
        let clusters = build_clusters(
            &[customer(1, "1 Penn Square"), customer(2, "1 Penn Square")],
            &philly_table(),
            &enricher,
            policy,
            now(),
        );
        assert_eq!(clusters[0].estimated_revenue, 16);
        assert_eq!(clusters[0].status, ClusterStatus::Completed);
    }

    #[test]
    fn test_extreme_policy_does_not_panic() {
        let policy = ClusterPolicy {
            revenue_per_customer: u64::MAX,
            recent_pickup_days: i64::MAX,
        };
        let enricher = FixedEnricher::new(1, Some(now() - Duration::days(400)));
        let clusters = build_clusters(
            &[customer(1, "1 Penn Square"), customer(2, "1 Penn Square")],
            &philly_table(),
            &enricher,
            policy,
            now(),
        );

        assert_eq!(clusters[0].estimated_revenue, u64::MAX);
        assert_eq!(clusters[0].status, ClusterStatus::Completed);

        let stats = crate::cluster::stats::compute_stats(&clusters);
        assert_eq!(stats.total_revenue, u64::MAX);
    }

    #[test]
    fn test_recent_cutoff_bounds() {
        assert_eq!(recent_cutoff(now(), 3), Some(now() - Duration::days(3)));
        assert!(recent_cutoff(now(), i64::MAX).is_none());
        assert!(recent_cutoff(now(), 1_000_000_000).is_none());
    }

    #[test]
    fn test_random_enrichment_does_not_change_membership() {
        let customers: Vec<Customer> = (0..20)
            .map(|i| customer(i, &format!("{} Pine Street", i)))
            .collect();
        let a = build_clusters(
            &customers,
            &HashGeocoder,
            &SeededEnricher::new(1),
            ClusterPolicy::default(),
            now(),
        );
        let b = build_clusters(
            &customers,
            &HashGeocoder,
            &SeededEnricher::new(2),
            ClusterPolicy::default(),
            now(),
        );
        let ids = |clusters: &[AddressCluster]| -> Vec<(String, Vec<i64>)> {
            clusters
                .iter()
                .map(|c| (c.id.clone(), c.addresses.iter().map(|a| a.customer_id).collect()))
                .collect()
        };
        assert_eq!(ids(&a), ids(&b));
    }

    #[test]
    fn test_address_kept_verbatim() {
        let clusters = build(&[customer(1, " 1 Penn Square ")], &HashGeocoder);
        assert_eq!(clusters[0].addresses[0].address, " 1 Penn Square ");
    }
}
