//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in repsense-core, written against the repsense-hal pin and bus traits:
//!
//! - Accelerometer (LIS3DSH over SPI)
//! - Indicator bank on GPIO LEDs, with logical-to-physical routing
//! - Momentary GPIO button

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod accel;
pub mod button;
pub mod indicator;
