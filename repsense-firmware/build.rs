//! Build script for repsense-firmware
//!
//! - Sets up linker search paths and scripts for memory.x
//! - Validates trainer.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Physical LEDs on the Discovery board
const BOARD_LEDS: i64 = 4;

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate trainer.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=trainer.toml");

    let config_path = Path::new("trainer.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: trainer.toml not found!                                  ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds trainer.toml at build time.                 ║\n\
            ║  Please create one in the repsense-firmware directory.           ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read trainer.toml                              ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Parse and validate TOML syntax
    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in trainer.toml                      ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_layout(&config, &mut errors);
    validate_values(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid configuration in trainer.toml                    ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=trainer.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Kind of value a key accepts
#[derive(Clone, Copy)]
enum Kind {
    Int,
    Number,
    Bool,
    Str,
}

/// Known sections and their keys; the on-device parser rejects anything else
const LAYOUT: &[(&str, &[(&str, Kind)])] = &[
    (
        "sensor",
        &[("counts_per_g", Kind::Number), ("detect_backoff_ms", Kind::Int)],
    ),
    ("filter", &[("window", Kind::Int), ("rest_g", Kind::Number)]),
    ("reps", &[("target", Kind::Int)]),
    ("machine", &[("push_down_guard", Kind::Str)]),
    (
        "feedback",
        &[
            ("get_ready_blinks", Kind::Int),
            ("get_ready_on_ms", Kind::Int),
            ("get_ready_off_ms", Kind::Int),
            ("countdown_on_ms", Kind::Int),
            ("countdown_off_ms", Kind::Int),
            ("complete_ms", Kind::Int),
            ("pause_ms", Kind::Int),
        ],
    ),
    ("timing", &[("tick_ms", Kind::Int)]),
    (
        "indicators",
        &[
            ("sit", Kind::Int),
            ("push", Kind::Int),
            ("jumping_jack", Kind::Int),
            ("squat", Kind::Int),
            ("rep_countdown", Kind::Int),
            ("sequence_complete", Kind::Int),
            ("active_low", Kind::Bool),
        ],
    ),
    ("button", &[("active_low", Kind::Bool)]),
];

/// Check that every section and key is known and has the right type
fn validate_layout(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        return;
    };

    for (section, body) in root {
        let Some(&(_, keys)) = LAYOUT.iter().find(|(name, _)| *name == section.as_str()) else {
            errors.push(format!("Unknown section [{}]", section));
            continue;
        };
        let Some(body) = body.as_table() else {
            errors.push(format!("[{}] must be a table", section));
            continue;
        };

        for (key, value) in body {
            let Some(&(_, kind)) = keys.iter().find(|(name, _)| *name == key.as_str()) else {
                errors.push(format!("[{}] unknown key '{}'", section, key));
                continue;
            };
            let ok = match kind {
                Kind::Int => value.is_integer(),
                Kind::Number => value.is_integer() || value.is_float(),
                Kind::Bool => value.is_bool(),
                Kind::Str => value.is_str(),
            };
            if !ok {
                errors.push(format!("[{}] '{}' has the wrong type", section, key));
            }
        }
    }
}

fn get<'a>(config: &'a toml::Value, section: &str, key: &str) -> Option<&'a toml::Value> {
    config.get(section)?.get(key)
}

fn number(value: &toml::Value) -> Option<f64> {
    value
        .as_float()
        .or_else(|| value.as_integer().map(|i| i as f64))
}

/// Check value ranges the trainer cannot run with
fn validate_values(config: &toml::Value, errors: &mut Vec<String>) {
    if let Some(window) = get(config, "filter", "window").and_then(|v| v.as_integer()) {
        if !(1..=64).contains(&window) {
            errors.push("[filter] window must be 1-64".to_string());
        }
    }

    if let Some(rest) = get(config, "filter", "rest_g").and_then(number) {
        if !(-1.0..=1.0).contains(&rest) {
            errors.push("[filter] rest_g must be between -1.0 and 1.0".to_string());
        }
    }

    if let Some(divisor) = get(config, "sensor", "counts_per_g").and_then(number) {
        if !divisor.is_finite() || divisor <= 0.0 {
            errors.push("[sensor] counts_per_g must be positive".to_string());
        }
    }

    if let Some(target) = get(config, "reps", "target").and_then(|v| v.as_integer()) {
        if !(0..=255).contains(&target) {
            errors.push("[reps] target must be 0-255".to_string());
        }
    }

    if let Some(tick) = get(config, "timing", "tick_ms").and_then(|v| v.as_integer()) {
        if tick <= 0 {
            errors.push("[timing] tick_ms must be greater than 0".to_string());
        }
    }

    if let Some(guard) = get(config, "machine", "push_down_guard").and_then(|v| v.as_str()) {
        if !["literal", "window"].contains(&guard) {
            errors.push("[machine] push_down_guard must be 'literal' or 'window'".to_string());
        }
    }

    if let Some(feedback) = config.get("feedback").and_then(|v| v.as_table()) {
        for (key, value) in feedback {
            if value.as_integer().is_some_and(|v| v < 0) {
                errors.push(format!("[feedback] {} must not be negative", key));
            }
        }
    }

    if let Some(indicators) = config.get("indicators").and_then(|v| v.as_table()) {
        for (key, value) in indicators {
            if let Some(led) = value.as_integer() {
                if !(0..BOARD_LEDS).contains(&led) {
                    errors.push(format!(
                        "[indicators] {} must be an LED number 0-{}",
                        key,
                        BOARD_LEDS - 1
                    ));
                }
            }
        }
    }
}
