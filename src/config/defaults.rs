//! Default configuration values
//!
//! Named constants for all tunable parameters

use crate::constants::pickup::{RECENT_PICKUP_DAYS, REVENUE_PER_CUSTOMER};

/// Default output format
pub const DEFAULT_FORMAT: &str = "json";

/// Default geocoder
pub const DEFAULT_GEOCODER: &str = "hash";

/// Default pickup detail enrichment
pub const DEFAULT_ENRICHMENT: &str = "random";

/// Default seed for the "seeded" enrichment
pub const DEFAULT_SEED: u64 = 0;

/// Default revenue per customer, in dollars
pub const DEFAULT_REVENUE_PER_CUSTOMER: u64 = REVENUE_PER_CUSTOMER;

/// Default recent-pickup window, in days
pub const DEFAULT_RECENT_PICKUP_DAYS: i64 = RECENT_PICKUP_DAYS;

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 7878;

/// Default URL provider
pub const DEFAULT_URL_PROVIDER: &str = "google";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Customer store file name
pub const CUSTOMERS_FILE_NAME: &str = "customers.json";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "pickup-clusters";
