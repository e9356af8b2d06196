//! Posture state machine
//!
//! Recognises the exercise from the resting tilt angle and counts a rep on
//! the transition that returns each exercise to its exerted posture. The
//! machine is explicit, finite and deterministic: the next state depends
//! only on the current state, the angle and the rep counters.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::{Countdown, ExerciseMachine, PushDownGuard, State, Step, Transition};
