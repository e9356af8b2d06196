//! Trainer loop
//!
//! Waits for the accelerometer, then ticks the trainer forever. Blink
//! sequences block inside a tick; the inter-tick wait yields to the
//! executor so the report task can drain events.

use defmt::*;
use embassy_time::{Duration, Timer};

use repsense_core::traits::{AccelerometerSensor, ButtonInput, IndicatorBank};
use repsense_core::trainer::Trainer;
use repsense_hal::DelayMs;

use crate::channels::EVENT_CHANNEL;

/// Run the trainer until power-off
pub async fn run_trainer<S, I, B, D>(mut trainer: Trainer<S, I, B, D>) -> !
where
    S: AccelerometerSensor,
    I: IndicatorBank,
    B: ButtonInput,
    D: DelayMs,
{
    info!("Waiting for accelerometer...");
    let failures = trainer.wait_for_sensor(|attempt, e| {
        warn!("Could not detect accelerometer (attempt {}): {:?}", attempt, e);
    });
    info!("Accelerometer detected after {} failed attempts", failures);

    let tick = Duration::from_millis(u64::from(trainer.config().timing.tick_ms));

    loop {
        match trainer.tick() {
            Ok(report) => {
                trace!(
                    "z={} filtered={} angle={} state={:?}",
                    report.sample_g,
                    report.filtered_g,
                    report.angle,
                    report.step.to
                );
                if report.step.changed() {
                    debug!("{:?} -> {:?}", report.step.from, report.step.to);
                }
                for event in report.events {
                    if EVENT_CHANNEL.try_send(event).is_err() {
                        warn!("Event channel full, dropping {:?}", event);
                    }
                }
            }
            Err(e) => {
                // State is untouched; try again next tick
                warn!("Accelerometer read failed: {:?}", e);
            }
        }

        Timer::after(tick).await;
    }
}
