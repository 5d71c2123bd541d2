//! Coordinates and great-circle distance.
//!
//! # Invariants
//! - Distances use a spherical earth with radius `EARTH_RADIUS_KM`.
//! - Display values are rounded to one decimal place.

use serde::{Deserialize, Serialize};

/// Mean earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Returns whether both components are finite and within range.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Distance to `other` in kilometers.
    pub fn distance_km(&self, other: &Coordinate) -> f64 {
        haversine_km(*self, *other)
    }
}

/// Great-circle distance between two coordinates in kilometers.
pub fn haversine_km(from: Coordinate, to: Coordinate) -> f64 {
    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();
    let a = (d_lat / 2.0).sin() * (d_lat / 2.0).sin()
        + from.latitude.to_radians().cos()
            * to.latitude.to_radians().cos()
            * (d_lon / 2.0).sin()
            * (d_lon / 2.0).sin();
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Rounds a distance to one decimal place, matching `format_km`.
pub fn round_km(distance_km: f64) -> f64 {
    format_km(distance_km).parse().unwrap_or(distance_km)
}

/// Formats a distance with exactly one decimal place, e.g. `48.1`.
///
/// Rounds the exact stored value to the nearest tenth; exact ties such as
/// `0.25` round away from zero.
pub fn format_km(distance_km: f64) -> String {
    let tenths = distance_km * 10.0;
    let exact_product = distance_km.mul_add(10.0, -tenths) == 0.0;
    if exact_product && tenths.is_finite() && tenths.fract().abs() == 0.5 {
        let rounded = tenths.abs().floor() + 1.0;
        let sign = if distance_km < 0.0 { "-" } else { "" };
        return format!("{sign}{:.1}", rounded / 10.0);
    }
    format!("{distance_km:.1}")
}
