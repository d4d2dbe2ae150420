//! Placeholder hash-based geocoder
//!
//! NOT a real geocoder. Addresses are hashed into a fixed box around
//! Philadelphia so that clustering has something deterministic to work
//! with. Two different addresses may land on the same coordinate, and no
//! output bears any relation to where the address actually is. Swap in a
//! real `AddressGeocoder` before using routes for anything real.

use crate::constants::geo::{HASH_LAT_BASE, HASH_LAT_STEPS, HASH_LNG_BASE, HASH_LNG_STEPS};
use crate::geo::{AddressGeocoder, Coordinates};

/// Deterministic hash geocoder
#[derive(Debug, Clone, Copy, Default)]
pub struct HashGeocoder;

impl AddressGeocoder for HashGeocoder {
    fn name(&self) -> &'static str {
        "hash"
    }

    fn description(&self) -> &'static str {
        "Deterministic hash placeholder (not real positions)"
    }

    fn geocode(&self, address: &str) -> Coordinates {
        coordinates_for_hash(address_hash(address))
    }
}

/// 32-bit rolling hash over the UTF-16 code units of `address`
///
/// `hash = hash * 31 + unit`, wrapping at 2^32.
pub fn address_hash(address: &str) -> i32 {
    address.encode_utf16().fold(0i32, |hash, unit| {
        hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit))
    })
}

/// Map a hash onto the placeholder box
///
/// `i32::MIN` is treated as 2^31 rather than overflowing.
pub fn coordinates_for_hash(hash: i32) -> Coordinates {
    let magnitude = u64::from(hash.unsigned_abs());
    let lat = HASH_LAT_BASE + (magnitude % HASH_LAT_STEPS) as f64 / 1000.0;
    let lng = HASH_LNG_BASE + (magnitude % HASH_LNG_STEPS) as f64 / 1000.0;
    Coordinates::new(lat, lng)
}
