//! Configuration loading
//!
//! The configuration is compiled in from trainer.toml. Anything that fails
//! to parse or validate falls back to the built-in defaults.

use defmt::*;

use repsense_core::config::{parse_config, TrainerConfig};

/// Embedded configuration (compiled into firmware)
/// Edit trainer.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../trainer.toml");

/// Load the embedded configuration, or defaults if it is unusable
pub fn load() -> TrainerConfig {
    let config = match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to parse trainer.toml: {:?}, using defaults", e);
            return TrainerConfig::default();
        }
    };

    match config.validate() {
        Ok(()) => {
            info!(
                "Config: window={} target={} tick={}ms guard={:?}",
                config.filter.window,
                config.reps.target,
                config.timing.tick_ms,
                config.machine.push_down_guard
            );
            config
        }
        Err(e) => {
            warn!("Invalid configuration: {:?}, using defaults", e);
            TrainerConfig::default()
        }
    }
}
