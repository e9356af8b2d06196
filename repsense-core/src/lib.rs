//! Board-agnostic core logic for the exercise counter firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Signal conditioning (ring filter, tilt angle)
//! - Per-exercise repetition counters
//! - Posture state machine that recognises the exercise and counts reps
//! - Indicator feedback (steady indicators, blink sequences)
//! - Capability traits for the sensor, indicators and button
//! - Configuration types and the config text parser
//! - The per-tick [`Trainer`](trainer::Trainer) pipeline

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod exercise;
pub mod feedback;
pub mod signal;
pub mod state;
pub mod traits;
pub mod trainer;
