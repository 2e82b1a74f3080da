//! Minimal TOML parser for greenhouse configuration
//!
//! This parser handles only the subset needed for window configuration and
//! does NOT support all of TOML. It needs no allocator.
//!
//! Supported features:
//! - `[window.<label>]` (or `[window <label>]`) section headers
//! - Key = value pairs (string, integer)
//! - Underscore digit separators in integers (`30_000`)
//! - Comments (# ...), including trailing comments
//!
//! ```toml
//! [window.roof_east]
//! direction_pin = "gpio2"
//! motor_pin = "gpio3"
//! opened_pin = "^!gpio4"   # ^ = pull-up, ! = active-low
//! closed_pin = "^!gpio5"
//! move_timeout_ms = 30_000
//! ```

use heapless::String;

use super::hardware::{
    make_label, ActuatorConfig, ConfigError, GreenhouseConfig, PinConfig, MAX_LABEL_LEN,
};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Invalid or unknown section header
    InvalidSection,
    /// Malformed line or value
    InvalidValue,
    /// Key not recognised in its section
    UnknownKey,
    /// Invalid pin string
    InvalidPin,
    /// Parsed values do not form a valid config
    Config(ConfigError),
}

impl From<ConfigError> for ParseError {
    fn from(e: ConfigError) -> Self {
        ParseError::Config(e)
    }
}

/// Window section being filled in
struct WindowDraft {
    label: String<MAX_LABEL_LEN>,
    direction_pin: Option<PinConfig>,
    motor_pin: Option<PinConfig>,
    opened_pin: Option<PinConfig>,
    closed_pin: Option<PinConfig>,
    move_timeout_ms: Option<u32>,
}

impl WindowDraft {
    fn new(label: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            label: make_label(label)?,
            direction_pin: None,
            motor_pin: None,
            opened_pin: None,
            closed_pin: None,
            move_timeout_ms: None,
        })
    }

    fn apply(&mut self, key: &str, value: &str) -> Result<(), ParseError> {
        match key {
            "direction_pin" => self.direction_pin = Some(parse_pin(value)?),
            "motor_pin" => self.motor_pin = Some(parse_pin(value)?),
            "opened_pin" => self.opened_pin = Some(parse_pin(value)?),
            "closed_pin" => self.closed_pin = Some(parse_pin(value)?),
            "move_timeout_ms" => self.move_timeout_ms = Some(parse_u32(value)?),
            _ => return Err(ParseError::UnknownKey),
        }
        Ok(())
    }

    fn finish(self) -> Result<ActuatorConfig, ConfigError> {
        let config = ActuatorConfig {
            label: self.label,
            direction_pin: self
                .direction_pin
                .ok_or(ConfigError::MissingField("direction_pin"))?,
            motor_pin: self.motor_pin.ok_or(ConfigError::MissingField("motor_pin"))?,
            opened_pin: self
                .opened_pin
                .ok_or(ConfigError::MissingField("opened_pin"))?,
            closed_pin: self
                .closed_pin
                .ok_or(ConfigError::MissingField("closed_pin"))?,
            move_timeout_ms: self
                .move_timeout_ms
                .ok_or(ConfigError::MissingField("move_timeout_ms"))?,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Parse TOML configuration into a validated GreenhouseConfig
pub fn parse_config(input: &str) -> Result<GreenhouseConfig, ParseError> {
    let mut config = GreenhouseConfig::new();
    let mut current: Option<WindowDraft> = None;

    for line in input.lines() {
        let line = strip_comment(line.trim());

        // Skip empty lines and comments
        if line.is_empty() {
            continue;
        }

        // Check for section header
        if line.starts_with('[') {
            if !line.ends_with(']') || line.len() < 2 {
                return Err(ParseError::InvalidSection);
            }
            save_window(&mut config, current.take())?;
            current = Some(parse_section_header(&line[1..line.len() - 1])?);
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidValue)?;
        match current.as_mut() {
            Some(window) => window.apply(key, value)?,
            // No settings live at the root
            None => return Err(ParseError::UnknownKey),
        }
    }

    save_window(&mut config, current.take())?;
    config.validate()?;
    Ok(config)
}

/// Parse section header like "window.roof" or "window roof"
fn parse_section_header(header: &str) -> Result<WindowDraft, ParseError> {
    let header = header.trim();
    let (kind, label) = header
        .split_once('.')
        .or_else(|| header.split_once(' '))
        .ok_or(ParseError::InvalidSection)?;

    if kind.trim() != "window" {
        return Err(ParseError::InvalidSection);
    }

    let label = parse_string(label.trim());
    if label.is_empty() || label.contains('.') {
        return Err(ParseError::InvalidSection);
    }

    Ok(WindowDraft::new(label)?)
}

/// Finish the current section and store it
fn save_window(
    config: &mut GreenhouseConfig,
    window: Option<WindowDraft>,
) -> Result<(), ParseError> {
    if let Some(window) = window {
        config.push(window.finish()?)?;
    }
    Ok(())
}

/// Remove a trailing comment, unless the # sits inside a string
fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(hash_pos) if line[..hash_pos].matches('"').count() % 2 == 0 => {
            line[..hash_pos].trim()
        }
        _ => line,
    }
}

/// Parse a key = value pair
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = value.trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> &str {
    if value.starts_with('"') && value.ends_with('"') && value.len() >= 2 {
        &value[1..value.len() - 1]
    } else {
        // Allow unquoted strings for simple values
        value
    }
}

/// Parse an unsigned integer, allowing `_` separators
fn parse_u32(value: &str) -> Result<u32, ParseError> {
    let mut result: u32 = 0;
    let mut digits = 0;

    for c in value.chars() {
        if c == '_' {
            continue;
        }
        let digit = c.to_digit(10).ok_or(ParseError::InvalidValue)?;
        result = result
            .checked_mul(10)
            .and_then(|r| r.checked_add(digit))
            .ok_or(ParseError::InvalidValue)?;
        digits += 1;
    }

    if digits == 0 || value.starts_with('_') || value.ends_with('_') {
        return Err(ParseError::InvalidValue);
    }
    Ok(result)
}

/// Parse a pin string like "gpio11", "!gpio12", "^gpio4", "^!gpio5"
fn parse_pin(value: &str) -> Result<PinConfig, ParseError> {
    let mut s = parse_string(value);
    let mut inverted = false;
    let mut pull_up = false;

    // Modifiers may appear in either order
    loop {
        if let Some(rest) = s.strip_prefix('!') {
            inverted = true;
            s = rest;
        } else if let Some(rest) = s.strip_prefix('^') {
            pull_up = true;
            s = rest;
        } else {
            break;
        }
    }

    let num = s.strip_prefix("gpio").ok_or(ParseError::InvalidPin)?;
    if num.is_empty() || !num.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidPin);
    }
    let pin: u8 = num.parse().map_err(|_| ParseError::InvalidPin)?;

    Ok(PinConfig {
        pin,
        inverted,
        pull_up,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_WINDOWS: &str = r#"
# Greenhouse node A
[window.roof_east]
direction_pin = "gpio2"
motor_pin = "gpio3"
opened_pin = "^!gpio4"   # limit switch to ground
closed_pin = "!^gpio5"
move_timeout_ms = 30_000

[window roof_west]
direction_pin = gpio6
motor_pin = "!gpio7"
opened_pin = "^!gpio8"
closed_pin = "^!gpio9"
move_timeout_ms = 45000
"#;

    #[test]
    fn test_parse_two_windows() {
        let config = parse_config(TWO_WINDOWS).unwrap();
        assert_eq!(config.windows.len(), 2);

        let east = config.find("roof_east").unwrap();
        assert_eq!(east.direction_pin, PinConfig::new(2));
        assert_eq!(east.motor_pin, PinConfig::new(3));
        assert_eq!(east.opened_pin, PinConfig::active_low_switch(4));
        assert_eq!(east.closed_pin, PinConfig::active_low_switch(5));
        assert_eq!(east.move_timeout_ms, 30_000);

        let west = config.find("roof_west").unwrap();
        assert_eq!(west.motor_pin, PinConfig::inverted(7));
        assert_eq!(west.move_timeout_ms, 45_000);
    }

    #[test]
    fn test_empty_input_has_no_windows() {
        let config = parse_config("# nothing here\n\n").unwrap();
        assert!(config.windows.is_empty());
    }

    #[test]
    fn test_missing_field() {
        let input = "[window.a]\ndirection_pin = \"gpio2\"\nmotor_pin = \"gpio3\"\nopened_pin = \"gpio4\"\nclosed_pin = \"gpio5\"\n";
        assert_eq!(
            parse_config(input),
            Err(ParseError::Config(ConfigError::MissingField(
                "move_timeout_ms"
            )))
        );
    }

    #[test]
    fn test_unknown_key() {
        let input = "[window.a]\nspeed = 3\n";
        assert_eq!(parse_config(input), Err(ParseError::UnknownKey));

        let input = "move_timeout_ms = 3\n";
        assert_eq!(parse_config(input), Err(ParseError::UnknownKey));
    }

    #[test]
    fn test_invalid_sections() {
        assert_eq!(parse_config("[heater.a]\n"), Err(ParseError::InvalidSection));
        assert_eq!(parse_config("[window]\n"), Err(ParseError::InvalidSection));
        assert_eq!(parse_config("[window.a\n"), Err(ParseError::InvalidSection));
        assert_eq!(
            parse_config("[window.a.b]\n"),
            Err(ParseError::InvalidSection)
        );
    }

    #[test]
    fn test_label_rules() {
        let pins = "direction_pin = \"gpio2\"\nmotor_pin = \"gpio3\"\nopened_pin = \"gpio4\"\nclosed_pin = \"gpio5\"\nmove_timeout_ms = 1000\n";

        let long = std::format!("[window.greenhouse_roof_east_vent]\n{}", pins);
        assert_eq!(
            parse_config(&long),
            Err(ParseError::Config(ConfigError::LabelTooLong))
        );

        // Exactly MAX_LABEL_LEN bytes still fits
        let longest = std::format!("[window.{}]\n{}", "a".repeat(MAX_LABEL_LEN), pins);
        assert_eq!(parse_config(&longest).unwrap().windows.len(), 1);

        let empty = std::format!("[window.\"\"]\n{}", pins);
        assert_eq!(parse_config(&empty), Err(ParseError::InvalidSection));

        let dotted = std::format!("[window.\"a.b\"]\n{}", pins);
        assert_eq!(parse_config(&dotted), Err(ParseError::InvalidSection));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let input = "[window.a]\ndirection_pin = \"gpio2\"\nmotor_pin = \"gpio3\"\nopened_pin = \"gpio4\"\nclosed_pin = \"gpio5\"\nmove_timeout_ms = 0\n";
        assert_eq!(
            parse_config(input),
            Err(ParseError::Config(ConfigError::ZeroTimeout))
        );
    }

    #[test]
    fn test_pin_shared_between_windows() {
        let input = r#"
[window.a]
direction_pin = "gpio2"
motor_pin = "gpio3"
opened_pin = "gpio4"
closed_pin = "gpio5"
move_timeout_ms = 1000

[window.b]
direction_pin = "gpio6"
motor_pin = "gpio3"
opened_pin = "gpio8"
closed_pin = "gpio9"
move_timeout_ms = 1000
"#;
        assert_eq!(
            parse_config(input),
            Err(ParseError::Config(ConfigError::PinConflict(3)))
        );
    }

    #[test]
    fn test_parse_pin() {
        assert_eq!(parse_pin("\"gpio11\""), Ok(PinConfig::new(11)));
        assert_eq!(parse_pin("!gpio12"), Ok(PinConfig::inverted(12)));
        assert_eq!(
            parse_pin("^gpio4"),
            Ok(PinConfig {
                pin: 4,
                inverted: false,
                pull_up: true
            })
        );
        assert_eq!(parse_pin("pin4"), Err(ParseError::InvalidPin));
        assert_eq!(parse_pin("gpio"), Err(ParseError::InvalidPin));
        assert_eq!(parse_pin("gpio+4"), Err(ParseError::InvalidPin));
        assert_eq!(parse_pin("gpio300"), Err(ParseError::InvalidPin));
    }

    #[test]
    fn test_parse_u32() {
        assert_eq!(parse_u32("5000"), Ok(5000));
        assert_eq!(parse_u32("30_000"), Ok(30_000));
        assert_eq!(parse_u32("-1"), Err(ParseError::InvalidValue));
        assert_eq!(parse_u32("_1"), Err(ParseError::InvalidValue));
        assert_eq!(parse_u32("99999999999"), Err(ParseError::InvalidValue));
    }

    #[test]
    fn test_comment_inside_string_kept() {
        assert_eq!(strip_comment("a = \"x#y\""), "a = \"x#y\"");
        assert_eq!(strip_comment("a = 1 # note"), "a = 1");
    }
}
