//! Exercise kinds and per-exercise repetition counters

pub mod kind;
pub mod reps;

pub use kind::Exercise;
pub use reps::{RepCounter, DEFAULT_TARGET, EXHAUSTED};
