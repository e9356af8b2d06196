//! Per-tick pipeline
//!
//! One tick reads the accelerometer, normalises the vertical axis, feeds
//! the ring filter, turns the mean into a tilt angle, steps the state
//! machine and drives the indicators. The trainer owns every piece of
//! mutable state, so there is exactly one authoritative copy.

use heapless::Vec;
use repsense_hal::DelayMs;

use crate::config::TrainerConfig;
use crate::exercise::RepCounter;
use crate::feedback::{FeedbackController, FeedbackSignal};
use crate::signal::{angle_degrees, RingFilter};
use crate::state::events::MAX_EVENTS_PER_STEP;
use crate::state::{Event, ExerciseMachine, State, Step};
use crate::traits::{AccelerometerSensor, ButtonInput, IndicatorBank, SensorError};

/// What happened during one tick
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    /// Normalised vertical acceleration of this tick's sample (g)
    pub sample_g: f32,
    /// Filter mean after the sample was pushed (g)
    pub filtered_g: f32,
    /// Tilt angle (degrees)
    pub angle: f32,
    pub step: Step,
    pub signal: FeedbackSignal,
    pub events: Vec<Event, MAX_EVENTS_PER_STEP>,
}

/// The exercise counter
pub struct Trainer<S, I, B, D> {
    config: TrainerConfig,
    filter: RingFilter,
    machine: ExerciseMachine,
    reps: RepCounter,
    feedback: FeedbackController,
    sensor: S,
    indicators: I,
    button: B,
    delay: D,
}

impl<S, I, B, D> Trainer<S, I, B, D>
where
    S: AccelerometerSensor,
    I: IndicatorBank,
    B: ButtonInput,
    D: DelayMs,
{
    /// Create a trainer in [`State::Reset`] with full counters
    ///
    /// `config` should already be validated.
    pub fn new(config: TrainerConfig, sensor: S, indicators: I, button: B, delay: D) -> Self {
        Self {
            filter: RingFilter::new(config.filter.window, config.filter.rest_g),
            machine: ExerciseMachine::new(config.machine.push_down_guard),
            reps: RepCounter::new(config.reps.target),
            feedback: FeedbackController::new(config.feedback),
            config,
            sensor,
            indicators,
            button,
            delay,
        }
    }

    /// Block until the accelerometer answers
    ///
    /// Retries forever with the configured backoff. `on_failure` is called
    /// with the attempt number and the error after each failed attempt.
    /// Returns the number of failed attempts.
    pub fn wait_for_sensor<F>(&mut self, mut on_failure: F) -> u32
    where
        F: FnMut(u32, SensorError),
    {
        let mut failures = 0u32;
        loop {
            match self.sensor.detect() {
                Ok(()) => return failures,
                Err(e) => {
                    failures = failures.saturating_add(1);
                    on_failure(failures, e);
                    self.delay.delay_ms(self.config.sensor.detect_backoff_ms);
                }
            }
        }
    }

    /// Run one tick
    ///
    /// A failed read returns the error and leaves filter, counters and state
    /// untouched. The inter-tick delay is left to the caller.
    pub fn tick(&mut self) -> Result<TickReport, SensorError> {
        let raw = self.sensor.read_raw()?;

        let sample_g = raw.z_g(self.config.sensor.counts_per_g);
        self.filter.push(sample_g);
        let filtered_g = self.filter.mean();
        let angle = angle_degrees(filtered_g);

        let pressed = self.button.is_pressed();
        let step = self.machine.step(angle, pressed, &mut self.reps);
        let signal = self
            .feedback
            .run(&step, &self.reps, &mut self.indicators, &mut self.delay);
        let events = Event::collect(&step, &self.reps);

        Ok(TickReport {
            sample_g,
            filtered_g,
            angle,
            step,
            signal,
            events,
        })
    }

    pub fn state(&self) -> State {
        self.machine.state()
    }

    pub fn reps(&self) -> &RepCounter {
        &self.reps
    }

    pub fn filter(&self) -> &RingFilter {
        &self.filter
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    pub fn indicators(&self) -> &I {
        &self.indicators
    }

    /// Release the hardware
    pub fn into_parts(self) -> (S, I, B, D) {
        (self.sensor, self.indicators, self.button, self.delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercise::{Exercise, EXHAUSTED};
    use crate::feedback::sequence::mock::{RecordingBank, SimDelay};
    use crate::traits::{Indicator, RawSample};
    use std::collections::VecDeque;

    const COUNTS_PER_G: f32 = 1000.0;

    /// Sensor that replays scripted results
    #[derive(Default)]
    struct ScriptedSensor {
        detect: VecDeque<Result<(), SensorError>>,
        reads: VecDeque<Result<RawSample, SensorError>>,
    }

    impl ScriptedSensor {
        fn at_angles(angles: &[f32]) -> Self {
            let mut sensor = Self::default();
            for &angle in angles {
                sensor.push_angle(angle);
            }
            sensor
        }

        fn push_angle(&mut self, angle: f32) {
            let z = (angle.to_radians().cos() * COUNTS_PER_G).round() as i16;
            self.reads.push_back(Ok(RawSample::new(0, 0, z)));
        }
    }

    impl AccelerometerSensor for ScriptedSensor {
        fn detect(&mut self) -> Result<(), SensorError> {
            self.detect.pop_front().unwrap_or(Ok(()))
        }

        fn read_raw(&mut self) -> Result<RawSample, SensorError> {
            self.reads.pop_front().unwrap_or(Err(SensorError::Bus))
        }
    }

    /// Button that replays a script, then stays released
    #[derive(Default)]
    struct ScriptedButton {
        presses: VecDeque<bool>,
    }

    impl ButtonInput for ScriptedButton {
        fn is_pressed(&mut self) -> bool {
            self.presses.pop_front().unwrap_or(false)
        }
    }

    type TestTrainer = Trainer<ScriptedSensor, RecordingBank, ScriptedButton, SimDelay>;

    /// Window of one so every tick sees its own angle
    fn direct_config() -> TrainerConfig {
        let mut config = TrainerConfig::default();
        config.sensor.counts_per_g = COUNTS_PER_G;
        config.filter.window = 1;
        config
    }

    fn trainer(config: TrainerConfig, sensor: ScriptedSensor) -> TestTrainer {
        Trainer::new(
            config,
            sensor,
            RecordingBank::default(),
            ScriptedButton::default(),
            SimDelay::default(),
        )
    }

    #[test]
    fn test_wait_for_sensor_retries() {
        let mut sensor = ScriptedSensor::default();
        sensor.detect.push_back(Err(SensorError::NotDetected));
        sensor.detect.push_back(Err(SensorError::Bus));
        let mut t = trainer(TrainerConfig::default(), sensor);

        let mut seen = std::vec::Vec::new();
        let failures = t.wait_for_sensor(|attempt, e| seen.push((attempt, e)));

        assert_eq!(failures, 2);
        assert_eq!(
            seen,
            [(1, SensorError::NotDetected), (2, SensorError::Bus)]
        );
        let (_, _, _, delay) = t.into_parts();
        assert_eq!(delay.elapsed_ms, 400);
    }

    #[test]
    fn test_wait_for_sensor_immediate() {
        let mut t = trainer(TrainerConfig::default(), ScriptedSensor::default());
        assert_eq!(t.wait_for_sensor(|_, _| panic!("no failure expected")), 0);
    }

    #[test]
    fn test_sit_up_pipeline() {
        let sensor = ScriptedSensor::at_angles(&[20.0, 50.0, 20.0]);
        let mut t = trainer(direct_config(), sensor);

        let report = t.tick().unwrap();
        assert!((report.angle - 20.0).abs() < 0.5);
        assert_eq!(report.step.to, State::LyingDown);
        assert!(report.step.get_ready);
        assert_eq!(
            report.events.as_slice(),
            &[Event::PostureAcquired(State::LyingDown)]
        );

        let report = t.tick().unwrap();
        assert_eq!(report.step.to, State::SittingUp);
        assert_eq!(t.reps().remaining(Exercise::Sit), 5);

        let report = t.tick().unwrap();
        assert_eq!(report.step.to, State::LyingDown);
        assert_eq!(report.step.rep, Some(Exercise::Sit));
        assert_eq!(t.reps().remaining(Exercise::Sit), 4);
        assert!(t.indicators().is_on(Indicator::Sit));
    }

    #[test]
    fn test_read_error_leaves_state_untouched() {
        let mut sensor = ScriptedSensor::at_angles(&[20.0]);
        sensor.reads.push_back(Err(SensorError::InvalidData));
        sensor.push_angle(50.0);
        let mut t = trainer(direct_config(), sensor);

        t.tick().unwrap();
        let cursor = t.filter().cursor();
        let mean = t.filter().mean();

        assert_eq!(t.tick(), Err(SensorError::InvalidData));
        assert_eq!(t.state(), State::LyingDown);
        assert_eq!(t.filter().cursor(), cursor);
        assert_eq!(t.filter().mean(), mean);

        assert_eq!(t.tick().unwrap().step.to, State::SittingUp);
    }

    #[test]
    fn test_warm_up_reads_as_flat() {
        // Default window of 20 pre-filled with 1 g: one tilted sample barely
        // moves the mean, so the machine sees a near-zero angle.
        let mut config = TrainerConfig::default();
        config.sensor.counts_per_g = COUNTS_PER_G;
        let mut t = trainer(config, ScriptedSensor::at_angles(&[90.0]));

        let report = t.tick().unwrap();
        assert!((report.filtered_g - 0.95).abs() < 1e-3);
        assert!(report.angle < 30.0);
        assert_eq!(report.step.to, State::LyingDown);
    }

    #[test]
    fn test_button_countdown_blocks_tick() {
        let sensor = ScriptedSensor::at_angles(&[20.0, 50.0]);
        let mut t = trainer(direct_config(), sensor);

        t.tick().unwrap();
        t.button.presses.push_back(true);
        let before = t.delay.elapsed_ms;

        let report = t.tick().unwrap();
        assert!(report.signal.countdown);
        assert_eq!(report.step.to, State::SittingUp);
        // Six reps left: 6 x (500 + 500) ms, then the 2 s pause
        assert_eq!(t.delay.elapsed_ms - before, 8000);
        assert_eq!(t.indicators.pulses(Indicator::RepCountdown), 6);
    }

    #[test]
    fn test_push_up_set_to_completion() {
        let mut config = direct_config();
        config.reps.target = 1;
        let mut angles = std::vec![70.0];
        for _ in 0..2 {
            angles.push(115.0);
            angles.push(105.0);
        }
        angles.push(115.0);
        angles.push(105.0);
        let mut t = trainer(config, ScriptedSensor::at_angles(&angles));

        assert_eq!(t.tick().unwrap().step.to, State::PushUp);
        let mut reps = 0;
        let mut milestone = false;
        for _ in 0..2 {
            assert_eq!(t.tick().unwrap().step.to, State::PushDown);
            let report = t.tick().unwrap();
            assert_eq!(report.step.rep, Some(Exercise::Push));
            milestone |= report.events.iter().any(Event::is_milestone);
            reps += 1;
        }
        assert_eq!(reps, 2);
        assert!(milestone);
        assert_eq!(t.reps().remaining(Exercise::Push), EXHAUSTED);

        assert_eq!(t.tick().unwrap().step.to, State::PushDown);
        let report = t.tick().unwrap();
        assert_eq!(report.step.to, State::Reset);
        assert_eq!(report.step.rep, None);
    }
}
