//! Hardware capability traits
//!
//! These traits define the interface between the exercise logic and the
//! devices it talks to. The firmware injects real drivers; tests inject
//! mocks.

pub mod button;
pub mod indicator;
pub mod sensor;

pub use button::ButtonInput;
pub use indicator::{Indicator, IndicatorBank};
pub use sensor::{AccelerometerSensor, RawSample, SensorError};
