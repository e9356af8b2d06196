//! Feedback controller

use repsense_hal::DelayMs;

use super::sequence::{Phase, Sequence};
use crate::config::FeedbackConfig;
use crate::exercise::{Exercise, RepCounter};
use crate::state::{Countdown, State, Step};
use crate::traits::{Indicator, IndicatorBank};

/// What the indicators show after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FeedbackSignal {
    /// Exercise indicator that is lit
    pub exercise: Option<Exercise>,
    /// A countdown display ran during the tick
    pub countdown: bool,
    /// Every rep counter is exhausted
    pub target_reached: bool,
}

impl FeedbackSignal {
    /// Project state and counters onto a signal
    pub fn project(state: State, reps: &RepCounter, countdown: bool) -> Self {
        Self {
            exercise: state.exercise(),
            countdown,
            target_reached: reps.all_exhausted(),
        }
    }
}

/// Maps machine steps to indicator output
///
/// Holds only timing configuration. The blink sequences block for their
/// whole duration; no samples are taken meanwhile.
#[derive(Debug, Clone, Default)]
pub struct FeedbackController {
    config: FeedbackConfig,
}

impl FeedbackController {
    pub fn new(config: FeedbackConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FeedbackConfig {
        &self.config
    }

    /// Blinks shown while the machine waits for a start posture
    pub fn get_ready(&self) -> Sequence {
        Sequence::new().then(Phase::Blink {
            indicator: Indicator::SequenceComplete,
            count: self.config.get_ready_blinks,
            on_ms: self.config.get_ready_on_ms,
            off_ms: self.config.get_ready_off_ms,
        })
    }

    /// Reps-left display for one exercise
    ///
    /// The countdown indicator blinks once per rep left. With none left the
    /// complete indicator is flashed instead.
    pub fn countdown(&self, countdown: Countdown) -> Sequence {
        let exercise = Indicator::for_exercise(countdown.exercise);
        let left = countdown.reps_left();

        let seq = Sequence::new().then(Phase::Set {
            indicator: exercise,
            on: true,
        });

        let seq = if left == 0 {
            seq.then(Phase::Set {
                indicator: Indicator::SequenceComplete,
                on: true,
            })
            .then(Phase::Hold {
                ms: self.config.complete_ms,
            })
            .then(Phase::Set {
                indicator: Indicator::SequenceComplete,
                on: false,
            })
        } else {
            seq.then(Phase::Blink {
                indicator: Indicator::RepCountdown,
                count: left,
                on_ms: self.config.countdown_on_ms,
                off_ms: self.config.countdown_off_ms,
            })
        };

        seq.then(Phase::Set {
            indicator: exercise,
            on: false,
        })
        .then(Phase::Hold {
            ms: self.config.pause_ms,
        })
    }

    /// Drive the indicators to match a signal
    pub fn apply<I: IndicatorBank + ?Sized>(&self, signal: &FeedbackSignal, indicators: &mut I) {
        for kind in Exercise::ALL {
            indicators.set(Indicator::for_exercise(kind), signal.exercise == Some(kind));
        }
        indicators.set(Indicator::RepCountdown, false);
        indicators.set(Indicator::SequenceComplete, signal.target_reached);
    }

    /// Play the sequences a step asks for, then show the resulting state
    ///
    /// `reps` must be the counters after the step.
    pub fn run<I, D>(
        &self,
        step: &Step,
        reps: &RepCounter,
        indicators: &mut I,
        delay: &mut D,
    ) -> FeedbackSignal
    where
        I: IndicatorBank + ?Sized,
        D: DelayMs + ?Sized,
    {
        if step.get_ready {
            self.get_ready().play(indicators, delay);
        }
        if let Some(countdown) = step.countdown {
            self.countdown(countdown).play(indicators, delay);
        }

        let signal = FeedbackSignal::project(step.to, reps, step.countdown.is_some());
        self.apply(&signal, indicators);
        signal
    }
}
