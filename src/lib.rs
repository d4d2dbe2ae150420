//! pickup-clusters: Trash Pickup Address Clustering
//!
//! A library and CLI tool that groups subscription customers into named
//! neighborhood clusters and orders each cluster into a pickup route.
//!
//! ## Features
//!
//! - Deterministic hash geocoder (placeholder for a real geocoding service)
//! - Nearest-centroid neighborhood matching over a fixed registry
//! - Cluster aggregation: centroid, revenue estimate, pickup status
//! - Greedy nearest-neighbor route ordering with directions links
//! - HTTP API + CLI interface
//!
//! ## Quick Start
//!
//! ```rust
//! use pickup_clusters::cluster::{ClusterEngine, ClusterPolicy, Customer};
//!
//! let engine = ClusterEngine::from_names("hash", "none", 0, ClusterPolicy::default());
//! let customers = vec![Customer {
//!     id: 1,
//!     username: "alice".to_string(),
//!     email: "alice@example.com".to_string(),
//!     address: Some("1234 Market Street, Philadelphia, PA 19107".to_string()),
//! }];
//!
//! let clusters = engine.cluster_customer_addresses(&customers);
//! assert_eq!(clusters.len(), 1);
//!
//! let route = engine.optimize_cluster_route(&clusters[0]);
//! assert_eq!(route.len(), 1);
//!
//! let stats = engine.get_cluster_stats(&clusters);
//! assert_eq!(stats.total_revenue, 5);
//! ```

pub mod cli;
pub mod cluster;
pub mod config;
pub mod constants;
pub mod error;
pub mod format;
pub mod geo;
pub mod route;
pub mod server;
pub mod store;

// Re-export commonly used types
pub use cluster::stats::ClusterStats;
pub use cluster::{AddressCluster, ClusterEngine, ClusterStatus, Customer, CustomerAddress};
pub use config::Config;
pub use error::{Error, Result};
pub use geo::Coordinates;
pub use route::RoutePlan;
