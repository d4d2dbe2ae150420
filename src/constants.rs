//! Centralized constants for the pickup-clusters crate
//!
//! This module consolidates constants that are used across multiple modules
//! to avoid duplication and ensure consistency.

/// Geographic constants
pub mod geo {
    /// Mean Earth radius in miles
    pub const EARTH_RADIUS_MILES: f64 = 3959.0;

    /// Southern edge of the placeholder geocoder's output box
    pub const HASH_LAT_BASE: f64 = 39.8;

    /// Western edge of the placeholder geocoder's output box
    pub const HASH_LNG_BASE: f64 = -75.8;

    /// Latitude buckets (thousandths of a degree) spanned by the placeholder geocoder
    pub const HASH_LAT_STEPS: u64 = 400;

    /// Longitude buckets (thousandths of a degree) spanned by the placeholder geocoder
    pub const HASH_LNG_STEPS: u64 = 900;
}

/// Pricing and scheduling assumptions used when aggregating clusters
pub mod pickup {
    /// Flat revenue per customer per pickup, in dollars
    pub const REVENUE_PER_CUSTOMER: u64 = 5;

    /// A cluster counts as completed if any member was picked up this recently
    pub const RECENT_PICKUP_DAYS: i64 = 3;

    /// Largest configurable recent-pickup window (ten years)
    pub const MAX_RECENT_PICKUP_DAYS: i64 = 3650;

    /// Random enrichment: bag count range (inclusive)
    pub const MIN_BAGS: u32 = 1;
    pub const MAX_BAGS: u32 = 3;

    /// Random enrichment: how far back a synthetic last pickup may fall
    pub const LAST_PICKUP_WINDOW_DAYS: i64 = 7;

    /// Random enrichment: probability that a customer has a last pickup at all
    pub const LAST_PICKUP_PROBABILITY: f64 = 0.5;
}

/// Map link templates
pub mod url {
    /// Google Maps multi-stop directions; `{stops}` is replaced by encoded addresses
    pub const GOOGLE_DIRECTIONS: &str = "https://www.google.com/maps/dir/{stops}";

    /// Separator placed between encoded stops in a directions link
    pub const STOP_SEPARATOR: &str = "/";
}
