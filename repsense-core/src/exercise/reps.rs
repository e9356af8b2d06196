//! Per-exercise repetition counters
//!
//! Each counter starts at the rep target and counts down on qualifying
//! transitions. Zero still admits one more rep; the counter then parks at
//! [`EXHAUSTED`] and never moves again.

use super::kind::Exercise;

/// Terminal counter value
pub const EXHAUSTED: i16 = -1;

/// Default starting value for every counter
pub const DEFAULT_TARGET: u8 = 5;

/// Independent countdown counters, one per exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RepCounter {
    remaining: [i16; Exercise::COUNT],
}

impl Default for RepCounter {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET)
    }
}

impl RepCounter {
    /// Create counters that all start at `target`
    pub fn new(target: u8) -> Self {
        Self {
            remaining: [target as i16; Exercise::COUNT],
        }
    }

    /// Count one rep for `kind` and return the new value
    ///
    /// Saturates at [`EXHAUSTED`].
    pub fn decrement(&mut self, kind: Exercise) -> i16 {
        let slot = &mut self.remaining[kind.index()];
        if *slot > EXHAUSTED {
            *slot -= 1;
        }
        *slot
    }

    /// Raw counter value for `kind`
    pub fn remaining(&self, kind: Exercise) -> i16 {
        self.remaining[kind.index()]
    }

    /// True once the counter for `kind` went below zero
    pub fn is_exhausted(&self, kind: Exercise) -> bool {
        self.remaining(kind) < 0
    }

    /// Reps the countdown display reports for `kind`
    ///
    /// A counter at zero still accepts one rep, so this is one more than the
    /// raw value.
    pub fn reps_left(&self, kind: Exercise) -> u16 {
        reps_left(self.remaining(kind))
    }

    /// True once every exercise is exhausted
    pub fn all_exhausted(&self) -> bool {
        Exercise::ALL.iter().all(|&kind| self.is_exhausted(kind))
    }
}

/// Reps left for a raw counter value
pub fn reps_left(remaining: i16) -> u16 {
    u16::try_from(remaining.saturating_add(1)).unwrap_or(0)
}
