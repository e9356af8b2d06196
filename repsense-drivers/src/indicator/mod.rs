//! Indicator outputs

pub mod gpio;

pub use gpio::GpioIndicators;
