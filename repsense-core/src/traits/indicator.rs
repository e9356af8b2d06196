//! Indicator outputs

use crate::exercise::Exercise;

/// Logical indicators driven by the feedback controller
///
/// Several logical indicators may share one physical LED; the bank
/// implementation decides the routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Indicator {
    /// Sit-ups in progress
    Sit,
    /// Push-ups in progress
    Push,
    /// Jumping jacks in progress
    JumpingJack,
    /// Squats in progress
    Squat,
    /// Blinks once per rep left during a countdown
    RepCountdown,
    /// Get-ready blinking and target reached
    SequenceComplete,
}

impl Indicator {
    /// Number of logical indicators
    pub const COUNT: usize = 6;

    /// All indicators, in index order
    pub const ALL: [Indicator; Self::COUNT] = [
        Indicator::Sit,
        Indicator::Push,
        Indicator::JumpingJack,
        Indicator::Squat,
        Indicator::RepCountdown,
        Indicator::SequenceComplete,
    ];

    /// Stable index into per-indicator arrays
    pub const fn index(self) -> usize {
        match self {
            Indicator::Sit => 0,
            Indicator::Push => 1,
            Indicator::JumpingJack => 2,
            Indicator::Squat => 3,
            Indicator::RepCountdown => 4,
            Indicator::SequenceComplete => 5,
        }
    }

    /// The "in progress" indicator of an exercise
    pub const fn for_exercise(exercise: Exercise) -> Self {
        match exercise {
            Exercise::Sit => Indicator::Sit,
            Exercise::Push => Indicator::Push,
            Exercise::Squat => Indicator::Squat,
            Exercise::JumpingJack => Indicator::JumpingJack,
        }
    }
}

/// Trait for a bank of on/off indicators
pub trait IndicatorBank {
    /// Turn an indicator on or off
    fn set(&mut self, indicator: Indicator, on: bool);

    /// Check if an indicator is currently on
    fn is_on(&self, indicator: Indicator) -> bool;

    /// Turn every indicator off
    fn all_off(&mut self) {
        for indicator in Indicator::ALL {
            self.set(indicator, false);
        }
    }
}
