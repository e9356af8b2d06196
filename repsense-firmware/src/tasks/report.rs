//! Event reporting task
//!
//! Logs workout progress published by the trainer loop.

use defmt::*;

use repsense_core::state::Event;

use crate::channels::EVENT_CHANNEL;

#[embassy_executor::task]
pub async fn report_task() {
    info!("Report task started");

    loop {
        match EVENT_CHANNEL.receive().await {
            Event::PostureAcquired(state) => {
                info!("Start posture: {:?}", state);
            }
            Event::RepCompleted {
                exercise,
                remaining,
            } => {
                info!("{} rep, counter now {}", exercise.label(), remaining);
            }
            Event::TargetReached(exercise) => {
                info!("{} target reached", exercise.label());
            }
            Event::ReturnedToReset { from } => {
                debug!("Back to reset from {:?}", from);
            }
            Event::WorkoutComplete => {
                info!("Workout complete");
            }
        }
    }
}
