//! Cluster summary stats for dashboard tiles

use crate::cluster::{AddressCluster, ClusterStatus};
use serde::{Deserialize, Serialize};

/// Summary counts over a set of clusters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterStats {
    pub total_clusters: usize,
    pub total_customers: usize,
    pub total_revenue: u64,
    pub available_clusters: usize,
    pub completed_today: usize,
}

/// Reduce clusters into summary counts
pub fn compute_stats(clusters: &[AddressCluster]) -> ClusterStats {
    clusters.iter().fold(
        ClusterStats {
            total_clusters: clusters.len(),
            ..ClusterStats::default()
        },
        |mut stats, cluster| {
            stats.total_customers = stats.total_customers.saturating_add(cluster.total_customers);
            stats.total_revenue = stats.total_revenue.saturating_add(cluster.estimated_revenue);
            match cluster.status {
                ClusterStatus::Available => stats.available_clusters += 1,
                ClusterStatus::Completed => stats.completed_today += 1,
                ClusterStatus::Scheduled => {}
            }
            stats
        },
    )
}
