//! State machine definition
//!
//! Angle thresholds, in degrees. Bounds are inclusive or exclusive exactly
//! as written at each comparison.

use crate::exercise::{reps, Exercise, RepCounter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Reset: at or below this angle the user is lying down (sit-up start)
pub const LYING_MAX_DEG: f32 = 30.0;
/// Reset: push-up start posture window, inclusive
pub const PUSH_START_MIN_DEG: f32 = 60.0;
pub const PUSH_START_MAX_DEG: f32 = 80.0;
/// Reset: at or above this angle the user is standing
pub const STANDING_MIN_DEG: f32 = 85.0;

/// Lying → sitting once the torso rises past this angle
pub const SIT_UP_MIN_DEG: f32 = 45.0;
/// Sitting → lying (rep) once back below this angle
pub const SIT_DOWN_MAX_DEG: f32 = 30.0;

/// Standing → squat window, exclusive
pub const SQUAT_MIN_DEG: f32 = 20.0;
pub const SQUAT_MAX_DEG: f32 = 65.0;
/// Squat/jump → standing (rep) once upright past this angle
pub const UPRIGHT_MIN_DEG: f32 = 85.0;

/// Push-up up phase window, inclusive
pub const PUSH_UP_MIN_DEG: f32 = 100.0;
pub const PUSH_UP_MAX_DEG: f32 = 125.0;
/// Push-down guard bounds
pub const PUSH_DOWN_LOW_DEG: f32 = 110.0;
pub const PUSH_DOWN_HIGH_DEG: f32 = 145.0;

/// Guard used to leave the push-down phase
///
/// The first-generation firmware compared `angle < 110 && angle <= 145`,
/// which reduces to `angle < 110`. Whether a `110 < angle <= 145` window
/// was meant has not been checked on hardware, so both are selectable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PushDownGuard {
    /// `angle < 110`
    #[default]
    Literal,
    /// `110 < angle <= 145`
    Window,
}

impl PushDownGuard {
    /// Check whether `angle` satisfies the guard
    pub fn admits(self, angle: f32) -> bool {
        match self {
            PushDownGuard::Literal => angle < PUSH_DOWN_LOW_DEG && angle <= PUSH_DOWN_HIGH_DEG,
            PushDownGuard::Window => angle > PUSH_DOWN_LOW_DEG && angle <= PUSH_DOWN_HIGH_DEG,
        }
    }
}

/// Machine states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Waiting for a recognisable start posture
    Reset,
    /// Sit-up: lying down
    LyingDown,
    /// Sit-up: sitting up
    SittingUp,
    /// Upright, ready for squats or jumping jacks
    Standing {
        /// Sub-exercise that last returned to standing
        last: Option<Exercise>,
    },
    /// Squat: down phase
    SquatDown,
    /// Jumping jack: jump phase
    Jump,
    /// Push-up: down phase
    PushDown,
    /// Push-up: up phase
    PushUp,
}

/// Result of evaluating the guards of one state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transition {
    /// State for the next tick
    pub next: State,
    /// Exercise whose counter this transition decrements
    pub rep: Option<Exercise>,
}

impl Transition {
    fn to(next: State) -> Self {
        Self { next, rep: None }
    }

    fn counting(next: State, exercise: Exercise) -> Self {
        Self {
            next,
            rep: Some(exercise),
        }
    }
}

impl State {
    /// Exercise whose indicator is lit in this state
    pub fn exercise(&self) -> Option<Exercise> {
        match self {
            State::Reset => None,
            State::LyingDown | State::SittingUp => Some(Exercise::Sit),
            State::Standing { last } => *last,
            State::SquatDown => Some(Exercise::Squat),
            State::Jump => Some(Exercise::JumpingJack),
            State::PushDown | State::PushUp => Some(Exercise::Push),
        }
    }

    /// Exercise whose countdown the button shows in this state
    pub fn countdown_exercise(&self) -> Option<Exercise> {
        match self {
            State::LyingDown | State::SittingUp => Some(Exercise::Sit),
            State::Standing { last } => *last,
            State::PushDown => Some(Exercise::Push),
            State::Reset | State::SquatDown | State::Jump | State::PushUp => None,
        }
    }

    /// Check if this is the re-acquisition state
    pub fn is_reset(&self) -> bool {
        matches!(self, State::Reset)
    }

    /// Evaluate this state's guards for one angle sample
    ///
    /// This is the core state transition logic. Any failed guard falls back
    /// to [`State::Reset`]; Reset itself keeps its state when nothing
    /// matches. A non-finite angle matches nothing.
    pub fn transition(self, angle: f32, reps: &RepCounter, push_down: PushDownGuard) -> Transition {
        use State::*;

        if !angle.is_finite() {
            return Transition::to(Reset);
        }

        let open = |kind: Exercise| !reps.is_exhausted(kind);

        match self {
            Reset => {
                // Independent checks, later ones win
                let mut next = Reset;
                if angle <= LYING_MAX_DEG {
                    next = LyingDown;
                }
                if (PUSH_START_MIN_DEG..=PUSH_START_MAX_DEG).contains(&angle) {
                    next = PushUp;
                }
                if angle >= STANDING_MIN_DEG {
                    next = Standing { last: None };
                }
                Transition::to(next)
            }

            LyingDown => {
                if angle > SIT_UP_MIN_DEG && open(Exercise::Sit) {
                    Transition::to(SittingUp)
                } else {
                    Transition::to(Reset)
                }
            }

            SittingUp => {
                if angle < SIT_DOWN_MAX_DEG && open(Exercise::Sit) {
                    Transition::counting(LyingDown, Exercise::Sit)
                } else {
                    Transition::to(Reset)
                }
            }

            Standing { .. } => {
                if angle > SQUAT_MIN_DEG && angle < SQUAT_MAX_DEG && open(Exercise::Squat) {
                    Transition::to(SquatDown)
                } else if open(Exercise::JumpingJack) {
                    Transition::to(Jump)
                } else {
                    Transition::to(Reset)
                }
            }

            SquatDown => {
                if angle > UPRIGHT_MIN_DEG && open(Exercise::Squat) {
                    Transition::counting(
                        Standing {
                            last: Some(Exercise::Squat),
                        },
                        Exercise::Squat,
                    )
                } else {
                    Transition::to(Reset)
                }
            }

            Jump => {
                if angle > UPRIGHT_MIN_DEG && open(Exercise::JumpingJack) {
                    Transition::counting(
                        Standing {
                            last: Some(Exercise::JumpingJack),
                        },
                        Exercise::JumpingJack,
                    )
                } else {
                    Transition::to(Reset)
                }
            }

            PushDown => {
                if push_down.admits(angle) && open(Exercise::Push) {
                    Transition::counting(PushUp, Exercise::Push)
                } else {
                    Transition::to(Reset)
                }
            }

            PushUp => {
                if (PUSH_UP_MIN_DEG..=PUSH_UP_MAX_DEG).contains(&angle) {
                    Transition::to(PushDown)
                } else {
                    Transition::to(Reset)
                }
            }
        }
    }
}

/// Countdown requested by the button during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Countdown {
    /// Exercise being counted down
    pub exercise: Exercise,
    /// Raw counter value before this tick's transition
    pub remaining: i16,
}

impl Countdown {
    /// Reps the display reports, zero once exhausted
    pub fn reps_left(&self) -> u16 {
        reps::reps_left(self.remaining)
    }
}

/// Everything one machine step decided
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Step {
    /// State the tick started in
    pub from: State,
    /// State the tick ended in
    pub to: State,
    /// Exercise whose rep was counted
    pub rep: Option<Exercise>,
    /// Get-ready sequence due (the tick started in Reset)
    pub get_ready: bool,
    /// Countdown requested by the button
    pub countdown: Option<Countdown>,
}

impl Step {
    /// Check if the state changed
    pub fn changed(&self) -> bool {
        self.from != self.to
    }
}

/// The exercise state machine
///
/// Owns the current state; rep counters are passed in so the caller can
/// keep a single authoritative copy.
#[derive(Debug, Clone)]
pub struct ExerciseMachine {
    state: State,
    push_down: PushDownGuard,
}

impl Default for ExerciseMachine {
    fn default() -> Self {
        Self::new(PushDownGuard::default())
    }
}

impl ExerciseMachine {
    /// Create a machine in [`State::Reset`]
    pub fn new(push_down: PushDownGuard) -> Self {
        Self {
            state: State::Reset,
            push_down,
        }
    }

    /// Current state
    pub fn state(&self) -> State {
        self.state
    }

    /// Push-down guard in use
    pub fn push_down_guard(&self) -> PushDownGuard {
        self.push_down
    }

    /// Advance one tick
    ///
    /// Decrements the counter named by the transition, if any. A countdown
    /// is only reported while `button` is held in a state that offers one,
    /// and never influences the transition.
    pub fn step(&mut self, angle: f32, button: bool, reps: &mut RepCounter) -> Step {
        let from = self.state;

        let countdown = if button {
            from.countdown_exercise().map(|exercise| Countdown {
                exercise,
                remaining: reps.remaining(exercise),
            })
        } else {
            None
        };

        let transition = from.transition(angle, reps, self.push_down);
        if let Some(kind) = transition.rep {
            reps.decrement(kind);
        }
        self.state = transition.next;

        Step {
            from,
            to: transition.next,
            rep: transition.rep,
            get_ready: from.is_reset(),
            countdown,
        }
    }
}
