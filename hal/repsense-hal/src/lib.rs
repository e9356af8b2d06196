//! Repsense Hardware Abstraction Layer
//!
//! This crate defines the small set of hardware traits the exercise counter
//! needs. Drivers in `repsense-drivers` are written against them, and the
//! firmware binds them to a concrete chip.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (repsense-firmware)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  repsense-core / repsense-drivers       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  repsense-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  embedded-hal 1.0 (via `embedded` mod)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`spi::SpiBus`] - SPI bus operations
//! - [`delay::DelayMs`] - Blocking millisecond delays

#![no_std]
#![deny(unsafe_code)]

pub mod delay;
pub mod gpio;
pub mod spi;

#[cfg(feature = "embedded-hal")]
pub mod embedded;

// Re-export key traits at crate root for convenience
pub use delay::DelayMs;
pub use gpio::{InputPin, OutputPin};
pub use spi::SpiBus;
