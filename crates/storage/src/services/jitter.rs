//! Declustering nudge for newly created map markers.
//!
//! Each axis moves by a uniformly drawn magnitude in
//! [`JITTER_MIN`, `JITTER_MAX`] degrees with an independent random sign, so
//! two submissions at the same venue never land on the exact same point.
//! The offset is baked into the stored coordinate at creation time and is
//! never reapplied on edit.
//!
//! Results always stay on the globe: a latitude offset that would pass a pole
//! is applied in the other direction, and longitude wraps at the antimeridian.

use rand::Rng;

use crate::models::Coordinates;
use crate::models::coordinates::is_valid_latitude;

pub const JITTER_MIN: f64 = 0.0010;
pub const JITTER_MAX: f64 = 0.0050;

pub fn jitter<R: Rng + ?Sized>(coordinates: Coordinates, rng: &mut R) -> Coordinates {
    let lat_offset = signed_offset(rng);
    let lng_offset = signed_offset(rng);

    let latitude = if is_valid_latitude(coordinates.latitude + lat_offset) {
        coordinates.latitude + lat_offset
    } else {
        coordinates.latitude - lat_offset
    };

    Coordinates {
        latitude,
        longitude: wrap_longitude(coordinates.longitude + lng_offset),
    }
}

fn wrap_longitude(longitude: f64) -> f64 {
    if longitude > 180.0 {
        longitude - 360.0
    } else if longitude < -180.0 {
        longitude + 360.0
    } else {
        longitude
    }
}

pub fn jitter_random(coordinates: Coordinates) -> Coordinates {
    jitter(coordinates, &mut rand::thread_rng())
}

fn signed_offset<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let magnitude = rng.gen_range(JITTER_MIN..=JITTER_MAX);
    if rng.gen_bool(0.5) { magnitude } else { -magnitude }
}
