//! Indicator feedback
//!
//! The controller projects machine state and counters onto the indicator
//! bank every tick and plays the blocking blink sequences (get-ready and rep
//! countdown). Sequences run against [`repsense_hal::DelayMs`], so the
//! elapsed time can be simulated.

pub mod controller;
pub mod sequence;

pub use controller::{FeedbackController, FeedbackSignal};
pub use sequence::{Phase, Sequence, MAX_PHASES};
