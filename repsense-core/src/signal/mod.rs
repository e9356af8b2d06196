//! Signal conditioning
//!
//! Raw vertical acceleration is normalised to g, smoothed by a fixed-window
//! moving average and mapped to a tilt angle in degrees.

pub mod angle;
pub mod ring;

pub use angle::{angle_degrees, clamp_gravity};
pub use ring::{RingFilter, DEFAULT_REST_G, DEFAULT_WINDOW, MAX_WINDOW};
