//! Workout events derived from machine steps

use heapless::Vec;

use super::machine::{State, Step};
use crate::exercise::{Exercise, RepCounter};

/// Upper bound on events produced by one step
pub const MAX_EVENTS_PER_STEP: usize = 4;

/// Events reported after each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Left Reset into a start posture
    PostureAcquired(State),
    /// A rep was counted
    RepCompleted {
        exercise: Exercise,
        /// Counter value after the rep
        remaining: i16,
    },
    /// The counter of an exercise just became exhausted
    TargetReached(Exercise),
    /// A guard failed and the machine fell back to Reset
    ReturnedToReset {
        from: State,
    },
    /// Every counter is exhausted
    WorkoutComplete,
}

impl Event {
    /// Collect the events implied by one step
    ///
    /// `reps` must be the counters after the step was applied.
    pub fn collect(step: &Step, reps: &RepCounter) -> Vec<Event, MAX_EVENTS_PER_STEP> {
        let mut events = Vec::new();

        if step.from.is_reset() && !step.to.is_reset() {
            let _ = events.push(Event::PostureAcquired(step.to));
        }

        if let Some(exercise) = step.rep {
            let remaining = reps.remaining(exercise);
            let _ = events.push(Event::RepCompleted {
                exercise,
                remaining,
            });
            if reps.is_exhausted(exercise) {
                let _ = events.push(Event::TargetReached(exercise));
                if reps.all_exhausted() {
                    let _ = events.push(Event::WorkoutComplete);
                }
            }
        }

        if !step.from.is_reset() && step.to.is_reset() {
            let _ = events.push(Event::ReturnedToReset { from: step.from });
        }

        events
    }

    /// Check if this event counted a rep
    pub fn is_rep(&self) -> bool {
        matches!(self, Event::RepCompleted { .. })
    }

    /// Check if this event marks the end of an exercise or the workout
    pub fn is_milestone(&self) -> bool {
        matches!(self, Event::TargetReached(_) | Event::WorkoutComplete)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::machine::ExerciseMachine;

    #[test]
    fn test_posture_acquired() {
        let mut reps = RepCounter::new(5);
        let mut machine = ExerciseMachine::default();
        let step = machine.step(20.0, false, &mut reps);
        let events = Event::collect(&step, &reps);
        assert_eq!(events.as_slice(), &[Event::PostureAcquired(State::LyingDown)]);
    }

    #[test]
    fn test_idle_reset_is_silent() {
        let mut reps = RepCounter::new(5);
        let mut machine = ExerciseMachine::default();
        let step = machine.step(50.0, false, &mut reps);
        assert!(Event::collect(&step, &reps).is_empty());
    }

    #[test]
    fn test_rep_and_target() {
        let mut reps = RepCounter::new(0);
        let step = Step {
            from: State::SittingUp,
            to: State::LyingDown,
            rep: Some(Exercise::Sit),
            get_ready: false,
            countdown: None,
        };
        reps.decrement(Exercise::Sit);

        let events = Event::collect(&step, &reps);
        assert_eq!(
            events.as_slice(),
            &[
                Event::RepCompleted {
                    exercise: Exercise::Sit,
                    remaining: -1
                },
                Event::TargetReached(Exercise::Sit),
            ]
        );
        assert!(events[0].is_rep());
        assert!(events[1].is_milestone());
    }

    #[test]
    fn test_workout_complete_on_last_counter() {
        let mut reps = RepCounter::new(0);
        for kind in Exercise::ALL {
            reps.decrement(kind);
        }
        let step = Step {
            from: State::PushDown,
            to: State::PushUp,
            rep: Some(Exercise::Push),
            get_ready: false,
            countdown: None,
        };
        let events = Event::collect(&step, &reps);
        assert_eq!(events.last(), Some(&Event::WorkoutComplete));
    }

    #[test]
    fn test_fallback_reported() {
        let mut reps = RepCounter::new(5);
        let mut machine = ExerciseMachine::default();
        machine.step(70.0, false, &mut reps);
        let step = machine.step(0.0, false, &mut reps);
        assert_eq!(step.to, State::Reset);
        let events = Event::collect(&step, &reps);
        assert_eq!(
            events.as_slice(),
            &[Event::ReturnedToReset {
                from: State::PushUp
            }]
        );
    }
}
