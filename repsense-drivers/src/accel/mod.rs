//! Accelerometer drivers

pub mod lis3dsh;

pub use lis3dsh::{spi_config, Lis3dsh, WHO_AM_I_VALUE};
