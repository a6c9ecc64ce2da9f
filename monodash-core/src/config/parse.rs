//! Minimal TOML parser for the dashboard configuration
//!
//! Handles only the subset the dashboard needs. It is NOT a TOML parser.
//!
//! Supported:
//! - `[section]` headers (`display`, `timing`, `battery`, `sensor`)
//! - `key = value` with integers (decimal or `0x` hex), floats, quoted
//!   strings and booleans
//! - Comments (`# ...`), full-line or trailing
//!
//! Keys not set in the input keep their defaults. Unknown sections and keys
//! are rejected so typos do not silently fall back to defaults.

use super::types::{ConfigError, DashboardConfig};
use crate::display::FlushStrategy;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Malformed `[section]` header
    InvalidSection,
    /// Section name not recognized
    UnknownSection,
    /// Key not recognized in its section
    UnknownKey,
    /// Line is neither a header nor `key = value`
    MissingValue,
    /// Value has the wrong type or spelling
    InvalidValue,
    /// Value does not fit the field
    OutOfRange,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Display,
    Timing,
    Battery,
    Sensor,
}

/// A parsed right-hand side
#[derive(Debug, Clone, Copy, PartialEq)]
enum Value<'a> {
    Int(i64),
    Float(f32),
    Str(&'a str),
    Bool(bool),
}

impl Value<'_> {
    fn int<T: TryFrom<i64>>(self) -> Result<T, ParseError> {
        match self {
            Value::Int(v) => T::try_from(v).map_err(|_| ParseError::OutOfRange),
            _ => Err(ParseError::InvalidValue),
        }
    }

    fn float(self) -> Result<f32, ParseError> {
        match self {
            Value::Float(v) => Ok(v),
            Value::Int(v) => Ok(v as f32),
            _ => Err(ParseError::InvalidValue),
        }
    }

    fn bool(self) -> Result<bool, ParseError> {
        match self {
            Value::Bool(b) => Ok(b),
            _ => Err(ParseError::InvalidValue),
        }
    }
}

/// Parse and validate a configuration
pub fn parse_config(input: &str) -> Result<DashboardConfig, ConfigError> {
    let mut config = DashboardConfig::default();
    let mut section = Section::Root;

    for (index, line) in input.lines().enumerate() {
        let at = |error| ConfigError::Parse {
            line: index as u32 + 1,
            error,
        };
        let line = strip_comment(line).trim();

        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let header = header.strip_suffix(']').ok_or(at(ParseError::InvalidSection))?;
            section = parse_section_header(header).map_err(at)?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(at(ParseError::MissingValue))?;
        let value = parse_value(value).map_err(at)?;
        apply_value(section, key, value, &mut config).map_err(at)?;
    }

    config.validate()?;
    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "" => Err(ParseError::InvalidSection),
        "display" => Ok(Section::Display),
        "timing" => Ok(Section::Timing),
        "battery" => Ok(Section::Battery),
        "sensor" => Ok(Section::Sensor),
        _ => Err(ParseError::UnknownSection),
    }
}

/// Drop a trailing comment that is not inside a string
fn strip_comment(line: &str) -> &str {
    let mut quoted = false;
    for (i, ch) in line.char_indices() {
        match ch {
            '"' => quoted = !quoted,
            '#' if !quoted => return &line[..i],
            _ => {}
        }
    }
    line
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let (key, value) = (key.trim(), value.trim());
    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key, value))
}

fn parse_value(value: &str) -> Result<Value<'_>, ParseError> {
    if let Some(inner) = value.strip_prefix('"') {
        return inner
            .strip_suffix('"')
            .map(Value::Str)
            .ok_or(ParseError::InvalidValue);
    }

    match value {
        "true" => return Ok(Value::Bool(true)),
        "false" => return Ok(Value::Bool(false)),
        _ => {}
    }

    let digits = strip_underscores(value)?;
    let digits = digits.as_str();

    if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        return i64::from_str_radix(hex, 16)
            .map(Value::Int)
            .map_err(|_| ParseError::InvalidValue);
    }

    if let Ok(v) = digits.parse::<i64>() {
        return Ok(Value::Int(v));
    }

    digits
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .map(Value::Float)
        .ok_or(ParseError::InvalidValue)
}

/// Numbers may separate digit groups with `_`
fn strip_underscores(value: &str) -> Result<heapless::String<32>, ParseError> {
    let mut out = heapless::String::new();
    for ch in value.chars().filter(|c| *c != '_') {
        out.push(ch).map_err(|_| ParseError::InvalidValue)?;
    }
    Ok(out)
}

fn apply_value(
    section: Section,
    key: &str,
    value: Value<'_>,
    config: &mut DashboardConfig,
) -> Result<(), ParseError> {
    match section {
        Section::Display => {
            let d = &mut config.display;
            match key {
                "width" => d.width = value.int()?,
                "height" => d.height = value.int()?,
                "buffer_rows" => d.buffer_rows = value.int()?,
                "i2c_address" => d.i2c_address = value.int()?,
                "invert" => d.invert = value.bool()?,
                "strategy" => {
                    let Value::Str(name) = value else {
                        return Err(ParseError::InvalidValue);
                    };
                    d.strategy = FlushStrategy::from_name(name).ok_or(ParseError::InvalidValue)?;
                }
                _ => return Err(ParseError::UnknownKey),
            }
        }
        Section::Timing => {
            let t = &mut config.timing;
            match key {
                "tick_ms" => t.tick_ms = value.int()?,
                "status_period_ms" => t.status_period_ms = value.int()?,
                _ => return Err(ParseError::UnknownKey),
            }
        }
        Section::Battery => {
            let b = &mut config.battery;
            match key {
                "divider" => b.divider = value.float()?,
                "vref" => b.vref = value.float()?,
                "correction" => b.correction = value.float()?,
                _ => return Err(ParseError::UnknownKey),
            }
        }
        Section::Sensor => match key {
            "full_scale" => config.sensor.full_scale = value.int()?,
            _ => return Err(ParseError::UnknownKey),
        },
        Section::Root => return Err(ParseError::UnknownKey),
    }
    Ok(())
}
