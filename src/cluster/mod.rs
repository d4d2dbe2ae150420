//! Address clustering
//!
//! This module handles:
//! - The customer / cluster data model
//! - Pickup detail enrichment
//! - Bucketing addresses into neighborhood clusters
//! - Dashboard stats over a set of clusters

pub mod builder;
pub mod enrich;
pub mod stats;

use crate::constants::pickup::{RECENT_PICKUP_DAYS, REVENUE_PER_CUSTOMER};
use crate::geo::{get_geocoder, AddressGeocoder, Coordinates};
use crate::route::optimize_route;
use chrono::{DateTime, Utc};
use enrich::{get_enricher, PickupEnricher};
use serde::{Deserialize, Serialize};
use stats::{compute_stats, ClusterStats};
use tracing::info;

/// A customer record as supplied by the user store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: Option<String>,
}

impl Customer {
    /// The address if it is present and not blank
    pub fn usable_address(&self) -> Option<&str> {
        self.address
            .as_deref()
            .filter(|address| !address.trim().is_empty())
    }
}

/// Subscription status of a customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionType {
    Active,
    Inactive,
}

/// One customer's location snapshot for clustering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerAddress {
    pub customer_id: i64,
    pub username: String,
    pub email: String,
    pub address: String,
    pub coordinates: Coordinates,
    pub subscription_type: SubscriptionType,
    pub bag_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_pickup: Option<DateTime<Utc>>,
}

/// Cluster pickup status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClusterStatus {
    Available,
    Scheduled,
    Completed,
}

impl std::fmt::Display for ClusterStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Available => write!(f, "available"),
            Self::Scheduled => write!(f, "scheduled"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

/// A neighborhood-level grouping of customer addresses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressCluster {
    /// Slug of the neighborhood name
    pub id: String,
    pub name: String,
    /// Sorted by address string
    pub addresses: Vec<CustomerAddress>,
    pub centroid: Coordinates,
    pub total_customers: usize,
    pub estimated_revenue: u64,
    pub status: ClusterStatus,
    /// Most recent member pickup; only set for completed clusters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_pickup_date: Option<DateTime<Utc>>,
}

/// Pricing and recency rules applied when aggregating a cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterPolicy {
    pub revenue_per_customer: u64,
    pub recent_pickup_days: i64,
}

impl Default for ClusterPolicy {
    fn default() -> Self {
        Self {
            revenue_per_customer: REVENUE_PER_CUSTOMER,
            recent_pickup_days: RECENT_PICKUP_DAYS,
        }
    }
}

/// Clusters plus their summary, as served to the admin dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterReport {
    /// Unique ID for this computation
    pub id: String,
    pub generated_at: DateTime<Utc>,
    pub clusters: Vec<AddressCluster>,
    pub stats: ClusterStats,
}

/// Clustering component with injected geocoder and enricher
///
/// Holds no mutable state; one engine can serve any number of callers.
pub struct ClusterEngine {
    geocoder: Box<dyn AddressGeocoder>,
    enricher: Box<dyn PickupEnricher>,
    policy: ClusterPolicy,
}

impl ClusterEngine {
    pub fn new(
        geocoder: Box<dyn AddressGeocoder>,
        enricher: Box<dyn PickupEnricher>,
        policy: ClusterPolicy,
    ) -> Self {
        Self {
            geocoder,
            enricher,
            policy,
        }
    }

    /// Build an engine from configured geocoder and enricher names
    pub fn from_names(geocoder: &str, enricher: &str, seed: u64, policy: ClusterPolicy) -> Self {
        Self::new(get_geocoder(geocoder), get_enricher(enricher, seed), policy)
    }

    pub fn geocoder_name(&self) -> &'static str {
        self.geocoder.name()
    }

    pub fn enricher_name(&self) -> &'static str {
        self.enricher.name()
    }

    pub fn policy(&self) -> ClusterPolicy {
        self.policy
    }

    /// Cluster customers as of the current time
    pub fn cluster_customer_addresses(&self, customers: &[Customer]) -> Vec<AddressCluster> {
        self.cluster_customer_addresses_at(customers, Utc::now())
    }

    /// Cluster customers as of `now`
    pub fn cluster_customer_addresses_at(
        &self,
        customers: &[Customer],
        now: DateTime<Utc>,
    ) -> Vec<AddressCluster> {
        let clusters = builder::build_clusters(
            customers,
            self.geocoder.as_ref(),
            self.enricher.as_ref(),
            self.policy,
            now,
        );
        info!(
            "Clustered {} customers into {} clusters ({} geocoder, {} enrichment)",
            customers.len(),
            clusters.len(),
            self.geocoder.name(),
            self.enricher.name()
        );
        clusters
    }

    /// Nearest-neighbor visiting order for one cluster
    pub fn optimize_cluster_route(&self, cluster: &AddressCluster) -> Vec<CustomerAddress> {
        optimize_route(cluster)
    }

    /// Summary numbers for a set of clusters
    pub fn get_cluster_stats(&self, clusters: &[AddressCluster]) -> ClusterStats {
        compute_stats(clusters)
    }

    /// Cluster customers and summarize them in one report
    pub fn report(&self, customers: &[Customer]) -> ClusterReport {
        let generated_at = Utc::now();
        let clusters = self.cluster_customer_addresses_at(customers, generated_at);
        let stats = compute_stats(&clusters);
        ClusterReport {
            id: uuid::Uuid::new_v4().to_string(),
            generated_at,
            clusters,
            stats,
        }
    }
}

impl Default for ClusterEngine {
    fn default() -> Self {
        Self::new(
            Box::new(crate::geo::hash::HashGeocoder),
            Box::new(enrich::RandomEnricher),
            ClusterPolicy::default(),
        )
    }
}

/// Find a cluster by id
pub fn find_cluster<'a>(clusters: &'a [AddressCluster], id: &str) -> Option<&'a AddressCluster> {
    clusters.iter().find(|c| c.id == id)
}
