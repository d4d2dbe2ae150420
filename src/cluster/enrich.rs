//! Pickup detail enrichment
//!
//! Bag counts and last pickup times are not wired to real data yet. They
//! come from a pluggable `PickupEnricher` so that callers choose between
//! synthetic random values and fixed ones.

use crate::cluster::Customer;
use crate::constants::pickup::{
    LAST_PICKUP_PROBABILITY, LAST_PICKUP_WINDOW_DAYS, MAX_BAGS, MIN_BAGS,
};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Per-customer pickup details supplied by an enricher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickupDetails {
    pub bag_count: u32,
    pub last_pickup: Option<DateTime<Utc>>,
}

/// Source of bag counts and last pickup times
pub trait PickupEnricher: Send + Sync {
    /// Returns the enricher name (e.g., "random", "none")
    fn name(&self) -> &'static str;

    /// Returns a human-readable description of this enricher
    fn description(&self) -> &'static str;

    /// Produce pickup details for one customer as of `now`
    fn enrich(&self, customer: &Customer, now: DateTime<Utc>) -> PickupDetails;
}

/// Draw synthetic details from any RNG
fn random_details<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> PickupDetails {
    let bag_count = rng.gen_range(MIN_BAGS..=MAX_BAGS);
    let last_pickup = if rng.gen_bool(LAST_PICKUP_PROBABILITY) {
        let window_minutes = LAST_PICKUP_WINDOW_DAYS * 24 * 60;
        Some(now - Duration::minutes(rng.gen_range(0..window_minutes)))
    } else {
        None
    };
    PickupDetails {
        bag_count,
        last_pickup,
    }
}

/// Synthetic random details, different on every call
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomEnricher;

impl PickupEnricher for RandomEnricher {
    fn name(&self) -> &'static str {
        "random"
    }

    fn description(&self) -> &'static str {
        "Synthetic bag counts and recent pickups (demo data)"
    }

    fn enrich(&self, _customer: &Customer, now: DateTime<Utc>) -> PickupDetails {
        random_details(&mut rand::thread_rng(), now)
    }
}

/// Seeded synthetic details for reproducible runs
pub struct SeededEnricher {
    rng: Mutex<rand::rngs::StdRng>,
}

impl SeededEnricher {
    /// Using the same seed will produce the same sequence of details.
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self {
            rng: Mutex::new(rand::rngs::StdRng::seed_from_u64(seed)),
        }
    }
}

impl PickupEnricher for SeededEnricher {
    fn name(&self) -> &'static str {
        "seeded"
    }

    fn description(&self) -> &'static str {
        "Synthetic details from clustering.seed (reproducible)"
    }

    fn enrich(&self, _customer: &Customer, now: DateTime<Utc>) -> PickupDetails {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        random_details(&mut *rng, now)
    }
}

/// The same details for every customer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedEnricher {
    pub bag_count: u32,
    pub last_pickup: Option<DateTime<Utc>>,
}

impl FixedEnricher {
    pub fn new(bag_count: u32, last_pickup: Option<DateTime<Utc>>) -> Self {
        Self {
            bag_count,
            last_pickup,
        }
    }
}

impl Default for FixedEnricher {
    fn default() -> Self {
        Self::new(MIN_BAGS, None)
    }
}

impl PickupEnricher for FixedEnricher {
    fn name(&self) -> &'static str {
        "none"
    }

    fn description(&self) -> &'static str {
        "No synthetic data: one bag, no recorded pickup"
    }

    fn enrich(&self, _customer: &Customer, _now: DateTime<Utc>) -> PickupDetails {
        PickupDetails {
            bag_count: self.bag_count,
            last_pickup: self.last_pickup,
        }
    }
}

/// Information about an enricher
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnricherInfo {
    pub name: String,
    pub description: String,
}

/// Get an enricher by name
///
/// `seed` is only used by the "seeded" enricher. Returns the random
/// enricher as default if name is not recognized.
pub fn get_enricher(name: &str, seed: u64) -> Box<dyn PickupEnricher> {
    match name {
        "none" => Box::new(FixedEnricher::default()),
        "random" => Box::new(RandomEnricher),
        "seeded" => Box::new(SeededEnricher::new(seed)),
        _ => Box::new(RandomEnricher),
    }
}

/// List all selectable enrichers
pub fn available_enrichers() -> Vec<EnricherInfo> {
    vec![
        EnricherInfo {
            name: "random".to_string(),
            description: RandomEnricher.description().to_string(),
        },
        EnricherInfo {
            name: "seeded".to_string(),
            description: SeededEnricher::new(0).description().to_string(),
        },
        EnricherInfo {
            name: "none".to_string(),
            description: FixedEnricher::default().description().to_string(),
        },
    ]
}
