//! Minimal TOML parser for trainer configuration
//!
//! Handles only the subset the trainer needs. It does NOT support the full
//! TOML spec and never allocates.
//!
//! Supported features:
//! - [section] headers
//! - Key = value pairs (string, integer, float, boolean)
//! - Comments (# ...), whole-line and trailing
//!
//! NOT supported:
//! - Dotted or nested sections
//! - Arrays and inline tables
//! - Multi-line strings

use core::str::FromStr;

use super::types::TrainerConfig;
use crate::state::PushDownGuard;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown section header, or a key outside any section
    InvalidSection,
    /// Key not recognised in its section
    UnknownKey,
    /// Malformed line or value of the wrong type
    InvalidValue,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Sensor,
    Filter,
    Reps,
    Machine,
    Feedback,
    Timing,
    Indicators,
    Button,
}

/// Parse TOML text into a [`TrainerConfig`]
///
/// Keys that are not present keep their default value. The result is not
/// validated; call [`TrainerConfig::validate`] afterwards.
pub fn parse_config(input: &str) -> Result<TrainerConfig, ParseError> {
    let mut config = TrainerConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            let header = strip_comment(line);
            if !header.ends_with(']') {
                return Err(ParseError::InvalidSection);
            }
            section = parse_section_header(&header[1..header.len() - 1])?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidValue)?;
        apply_value(section, key, value, &mut config)?;
    }

    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "sensor" => Ok(Section::Sensor),
        "filter" => Ok(Section::Filter),
        "reps" => Ok(Section::Reps),
        "machine" => Ok(Section::Machine),
        "feedback" => Ok(Section::Feedback),
        "timing" => Ok(Section::Timing),
        "indicators" => Ok(Section::Indicators),
        "button" => Ok(Section::Button),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Remove a trailing comment that is not inside a string
fn strip_comment(s: &str) -> &str {
    match s.find('#') {
        Some(hash_pos) if s[..hash_pos].matches('"').count() % 2 == 0 => s[..hash_pos].trim(),
        _ => s,
    }
}

/// Split a `key = value` line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = strip_comment(line[eq_pos + 1..].trim());

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

/// Parse a numeric value
fn parse_num<T: FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

fn parse_push_down_guard(value: &str) -> Result<PushDownGuard, ParseError> {
    match parse_string(value) {
        "literal" => Ok(PushDownGuard::Literal),
        "window" => Ok(PushDownGuard::Window),
        _ => Err(ParseError::InvalidValue),
    }
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut TrainerConfig,
) -> Result<(), ParseError> {
    match section {
        Section::Root => return Err(ParseError::InvalidSection),
        Section::Sensor => match key {
            "counts_per_g" => config.sensor.counts_per_g = parse_num(value)?,
            "detect_backoff_ms" => config.sensor.detect_backoff_ms = parse_num(value)?,
            _ => return Err(ParseError::UnknownKey),
        },
        Section::Filter => match key {
            "window" => config.filter.window = parse_num(value)?,
            "rest_g" => config.filter.rest_g = parse_num(value)?,
            _ => return Err(ParseError::UnknownKey),
        },
        Section::Reps => match key {
            "target" => config.reps.target = parse_num(value)?,
            _ => return Err(ParseError::UnknownKey),
        },
        Section::Machine => match key {
            "push_down_guard" => config.machine.push_down_guard = parse_push_down_guard(value)?,
            _ => return Err(ParseError::UnknownKey),
        },
        Section::Feedback => {
            let fb = &mut config.feedback;
            match key {
                "get_ready_blinks" => fb.get_ready_blinks = parse_num(value)?,
                "get_ready_on_ms" => fb.get_ready_on_ms = parse_num(value)?,
                "get_ready_off_ms" => fb.get_ready_off_ms = parse_num(value)?,
                "countdown_on_ms" => fb.countdown_on_ms = parse_num(value)?,
                "countdown_off_ms" => fb.countdown_off_ms = parse_num(value)?,
                "complete_ms" => fb.complete_ms = parse_num(value)?,
                "pause_ms" => fb.pause_ms = parse_num(value)?,
                _ => return Err(ParseError::UnknownKey),
            }
        }
        Section::Timing => match key {
            "tick_ms" => config.timing.tick_ms = parse_num(value)?,
            _ => return Err(ParseError::UnknownKey),
        },
        Section::Indicators => {
            let ind = &mut config.indicators;
            match key {
                "sit" => ind.sit = parse_num(value)?,
                "push" => ind.push = parse_num(value)?,
                "jumping_jack" => ind.jumping_jack = parse_num(value)?,
                "squat" => ind.squat = parse_num(value)?,
                "rep_countdown" => ind.rep_countdown = parse_num(value)?,
                "sequence_complete" => ind.sequence_complete = parse_num(value)?,
                "active_low" => ind.active_low = parse_bool(value)?,
                _ => return Err(ParseError::UnknownKey),
            }
        }
        Section::Button => match key {
            "active_low" => config.button.active_low = parse_bool(value)?,
            _ => return Err(ParseError::UnknownKey),
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;

    const BOARD: &str = r#"
# Discovery board defaults, spelled out
[sensor]
counts_per_g = 18263.0
detect_backoff_ms = 200

[filter]
window = 20
rest_g = 1.0   # flat

[reps]
target = 5

[machine]
push_down_guard = "literal"

[feedback]
get_ready_blinks = 10
get_ready_on_ms = 600
get_ready_off_ms = 400
countdown_on_ms = 500
countdown_off_ms = 500
complete_ms = 1000
pause_ms = 2000

[timing]
tick_ms = 100

[indicators]
sit = 0
push = 1
jumping_jack = 2
squat = 3
rep_countdown = 1
sequence_complete = 2
active_low = false

[button]
active_low = false
"#;

    #[test]
    fn test_board_file_matches_defaults() {
        let config = parse_config(BOARD).unwrap();
        assert_eq!(config, TrainerConfig::default());
    }

    #[test]
    fn test_empty_input_is_default() {
        assert_eq!(parse_config("").unwrap(), TrainerConfig::default());
        assert_eq!(parse_config("# nothing\n\n").unwrap(), TrainerConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = parse_config(
            "[filter]\nwindow = 8\n[machine]\npush_down_guard = \"window\"\n[reps]\ntarget = 3\n",
        )
        .unwrap();
        assert_eq!(config.filter.window, 8);
        assert_eq!(config.machine.push_down_guard, PushDownGuard::Window);
        assert_eq!(config.reps.target, 3);
        assert_eq!(config.timing.tick_ms, 100);
    }

    #[test]
    fn test_integer_divisor() {
        let config = parse_config("[sensor]\ncounts_per_g = 16384\n").unwrap();
        assert_eq!(config.sensor.counts_per_g, 16384.0);
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse_config("[gyro]\n"), Err(ParseError::InvalidSection));
        assert_eq!(parse_config("[filter\n"), Err(ParseError::InvalidSection));
        assert_eq!(parse_config("window = 3\n"), Err(ParseError::InvalidSection));
        assert_eq!(parse_config("[filter]\nsize = 3\n"), Err(ParseError::UnknownKey));
        assert_eq!(parse_config("[filter]\nwindow = -3\n"), Err(ParseError::InvalidValue));
        assert_eq!(parse_config("[filter]\nwindow\n"), Err(ParseError::InvalidValue));
        assert_eq!(parse_config("[reps]\ntarget = 300\n"), Err(ParseError::InvalidValue));
        assert_eq!(
            parse_config("[button]\nactive_low = yes\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[machine]\npush_down_guard = \"range\"\n"),
            Err(ParseError::InvalidValue)
        );
    }

    #[test]
    fn test_parsed_but_invalid() {
        let config = parse_config("[filter]\nwindow = 0\n").unwrap();
        assert_eq!(config.validate(), Err(ConfigError::InvalidWindow));
    }

    #[test]
    fn test_strip_comment_keeps_hash_in_string() {
        assert_eq!(parse_key_value("a = \"x#y\""), Some(("a", "\"x#y\"")));
        assert_eq!(parse_key_value("a = 3 # three"), Some(("a", "3")));
        assert_eq!(parse_key_value("a ="), None);
    }
}
