//! Server shared state
//!
//! Holds configuration, the clustering engine and the customer store.

use crate::cluster::{ClusterEngine, Customer};
use crate::config::Config;
use crate::store::CustomerStore;
use std::time::Instant;
use tokio::sync::RwLock;

/// Shared state for the HTTP server
pub struct AppState {
    /// Configuration, fixed for the lifetime of the server
    pub config: Config,

    /// Clustering engine built from the configured geocoder and enrichment
    pub engine: ClusterEngine,

    /// Customer source
    store: RwLock<CustomerStore>,

    started_at: Instant,
}

impl AppState {
    /// Create new application state
    pub fn new(config: Config, store: CustomerStore) -> Self {
        let engine = config.engine();
        Self {
            config,
            engine,
            store: RwLock::new(store),
            started_at: Instant::now(),
        }
    }

    /// Snapshot of the current customer list
    pub async fn customers(&self) -> Vec<Customer> {
        self.store.read().await.customers().to_vec()
    }

    /// Replace the customer list and persist it
    pub async fn replace_customers(&self, customers: Vec<Customer>) -> crate::error::Result<usize> {
        let mut store = self.store.write().await;
        store.replace_and_save(customers)?;
        Ok(store.len())
    }

    /// Number of stored customers
    pub async fn customer_count(&self) -> usize {
        self.store.read().await.len()
    }

    /// Seconds since the state was created
    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
