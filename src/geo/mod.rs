//! Geographic primitives
//!
//! Provides coordinates, great-circle distance, the geocoding seam and the
//! neighborhood registry used for bucketing addresses.

pub mod distance;
pub mod hash;
pub mod neighborhood;

use serde::{Deserialize, Serialize};

/// A geographic coordinate (latitude, longitude)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Create new coordinates
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validate that coordinates are within valid ranges
    ///
    /// Latitude: -90 to 90
    /// Longitude: -180 to 180
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.lat < -90.0 || self.lat > 90.0 {
            return Err(crate::error::Error::InvalidCoordinates(format!(
                "Latitude {} is out of range [-90, 90]",
                self.lat
            )));
        }
        if self.lng < -180.0 || self.lng > 180.0 {
            return Err(crate::error::Error::InvalidCoordinates(format!(
                "Longitude {} is out of range [-180, 180]",
                self.lng
            )));
        }
        Ok(())
    }
}

/// Trait for address geocoders
///
/// Geocoding is infallible at this seam: every address maps to some
/// coordinate. A networked implementation would own its own timeout and
/// fallback policy behind this trait.
pub trait AddressGeocoder: Send + Sync {
    /// Returns the geocoder name (e.g., "hash")
    fn name(&self) -> &'static str;

    /// Returns a human-readable description of this geocoder
    fn description(&self) -> &'static str;

    /// Map a free-text address to a coordinate
    fn geocode(&self, address: &str) -> Coordinates;
}

/// Information about a geocoder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocoderInfo {
    /// Geocoder name (used in config/CLI)
    pub name: String,
    /// Human-readable description
    pub description: String,
}

/// Get a geocoder by name
///
/// Returns the hash geocoder as default if name is not recognized
pub fn get_geocoder(name: &str) -> Box<dyn AddressGeocoder> {
    match name {
        "hash" => Box::new(hash::HashGeocoder),
        _ => Box::new(hash::HashGeocoder),
    }
}

/// List all available geocoders with their info
pub fn available_geocoders() -> Vec<GeocoderInfo> {
    vec![GeocoderInfo {
        name: "hash".to_string(),
        description: hash::HashGeocoder.description().to_string(),
    }]
}
