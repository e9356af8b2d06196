//! Tilt angle estimation
//!
//! Under the assumption that the only acceleration is gravity, the
//! normalised vertical component is the cosine of the tilt between the
//! sensor axis and the gravity vector.

use core::f32::consts::PI;

/// Clamp a filtered gravity value to the arccos domain `[-1, 1]`
///
/// Values past either bound come from motion, not orientation. NaN is
/// passed through so callers can see it.
pub fn clamp_gravity(filtered: f32) -> f32 {
    if filtered > 1.0 {
        1.0
    } else if filtered < -1.0 {
        -1.0
    } else {
        filtered
    }
}

/// Tilt angle in degrees, 0 = axis along gravity, 180 = inverted
pub fn angle_degrees(filtered: f32) -> f32 {
    180.0 * libm::acosf(clamp_gravity(filtered)) / PI
}
