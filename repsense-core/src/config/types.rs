//! Configuration type definitions

use crate::exercise::DEFAULT_TARGET;
use crate::signal::{DEFAULT_REST_G, DEFAULT_WINDOW, MAX_WINDOW};
use crate::state::PushDownGuard;
use crate::traits::Indicator;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Counts per g of the LIS3DSH at ±2 g, as calibrated on the Discovery board
pub const DEFAULT_COUNTS_PER_G: f32 = 18263.0;

/// Maximum number of physical LEDs an indicator can be routed to
pub const MAX_LEDS: u8 = 8;

/// Validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Filter window is zero or above the supported maximum
    InvalidWindow,
    /// Counts-per-g divisor is zero, negative or not finite
    InvalidDivisor,
    /// Rest value lies outside [-1, 1]
    InvalidRestValue,
    /// Tick interval is zero
    InvalidTickInterval,
    /// Indicator is routed to a LED that does not exist
    InvalidRoute(Indicator),
}

/// Accelerometer settings
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SensorConfig {
    /// Raw counts that correspond to 1 g
    pub counts_per_g: f32,
    /// Wait between detection attempts at startup (ms)
    pub detect_backoff_ms: u32,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            counts_per_g: DEFAULT_COUNTS_PER_G,
            detect_backoff_ms: 200,
        }
    }
}

/// Moving-average filter settings
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FilterConfig {
    /// Number of samples averaged
    pub window: usize,
    /// Value every slot holds before real samples arrive (g)
    pub rest_g: f32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            rest_g: DEFAULT_REST_G,
        }
    }
}

/// Rep targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RepsConfig {
    /// Starting value of every counter
    pub target: u8,
}

impl Default for RepsConfig {
    fn default() -> Self {
        Self {
            target: DEFAULT_TARGET,
        }
    }
}

/// State machine settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MachineConfig {
    pub push_down_guard: PushDownGuard,
}

/// Blink sequence timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FeedbackConfig {
    /// Blinks shown while waiting in Reset
    pub get_ready_blinks: u16,
    pub get_ready_on_ms: u32,
    pub get_ready_off_ms: u32,
    pub countdown_on_ms: u32,
    pub countdown_off_ms: u32,
    /// How long the complete indicator is lit when no reps are left
    pub complete_ms: u32,
    /// Pause after a countdown
    pub pause_ms: u32,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            get_ready_blinks: 10,
            get_ready_on_ms: 600,
            get_ready_off_ms: 400,
            countdown_on_ms: 500,
            countdown_off_ms: 500,
            complete_ms: 1000,
            pause_ms: 2000,
        }
    }
}

/// Main loop timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimingConfig {
    /// Delay between ticks (ms)
    pub tick_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self { tick_ms: 100 }
    }
}

/// Logical indicator to physical LED routing
///
/// LED numbers index the board's LED array. The defaults match the
/// Discovery board: four exercise LEDs, with the countdown sharing the push
/// LED and the complete indicator sharing the jumping jack LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IndicatorConfig {
    pub sit: u8,
    pub push: u8,
    pub jumping_jack: u8,
    pub squat: u8,
    pub rep_countdown: u8,
    pub sequence_complete: u8,
    /// LEDs light when the pin is driven low
    pub active_low: bool,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            sit: 0,
            push: 1,
            jumping_jack: 2,
            squat: 3,
            rep_countdown: 1,
            sequence_complete: 2,
            active_low: false,
        }
    }
}

impl IndicatorConfig {
    /// LED an indicator is routed to
    pub fn led(&self, indicator: Indicator) -> u8 {
        match indicator {
            Indicator::Sit => self.sit,
            Indicator::Push => self.push,
            Indicator::JumpingJack => self.jumping_jack,
            Indicator::Squat => self.squat,
            Indicator::RepCountdown => self.rep_countdown,
            Indicator::SequenceComplete => self.sequence_complete,
        }
    }

    /// Routing table indexed by [`Indicator::index`]
    pub fn routes(&self) -> [u8; Indicator::COUNT] {
        Indicator::ALL.map(|indicator| self.led(indicator))
    }
}

/// Button settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ButtonConfig {
    /// Button reads low while pressed
    pub active_low: bool,
}

/// Complete trainer configuration
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrainerConfig {
    pub sensor: SensorConfig,
    pub filter: FilterConfig,
    pub reps: RepsConfig,
    pub machine: MachineConfig,
    pub feedback: FeedbackConfig,
    pub timing: TimingConfig,
    pub indicators: IndicatorConfig,
    pub button: ButtonConfig,
}

impl TrainerConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the configuration for values the trainer cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.filter.window == 0 || self.filter.window > MAX_WINDOW {
            return Err(ConfigError::InvalidWindow);
        }
        if !self.sensor.counts_per_g.is_finite() || self.sensor.counts_per_g <= 0.0 {
            return Err(ConfigError::InvalidDivisor);
        }
        if !(-1.0..=1.0).contains(&self.filter.rest_g) {
            return Err(ConfigError::InvalidRestValue);
        }
        if self.timing.tick_ms == 0 {
            return Err(ConfigError::InvalidTickInterval);
        }
        for indicator in Indicator::ALL {
            if self.indicators.led(indicator) >= MAX_LEDS {
                return Err(ConfigError::InvalidRoute(indicator));
            }
        }
        Ok(())
    }
}
