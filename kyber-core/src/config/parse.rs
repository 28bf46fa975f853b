//! Simple TOML parser for the saber configuration
//!
//! This is a minimal line-based parser that handles only the subset needed
//! for `saber.toml`. It does NOT handle the full TOML language.
//!
//! Supported features:
//! - Key = value pairs (string, integer, float, boolean)
//! - [section] headers
//! - Comments (# ...), including trailing comments after values
//! - Hex colors ("#RRGGBB") under `[palette]`, kept in declaration order
//!
//! NOT supported:
//! - Arrays and inline tables
//! - Multi-line strings
//! - Dotted keys and nested sections

use smart_leds::RGB8;

use super::types::{ConfigError, SaberConfig};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Line is neither a section header nor `key = value`
    Syntax { line: u16 },
    /// Unknown section header
    InvalidSection { line: u16 },
    /// Key not recognized in its section
    UnknownKey { line: u16 },
    /// Value has the wrong type or is out of range
    InvalidValue { line: u16 },
    /// Parsed configuration failed validation
    Invalid(ConfigError),
}

impl From<ConfigError> for ParseError {
    fn from(e: ConfigError) -> Self {
        ParseError::Invalid(e)
    }
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Motion,
    Button,
    Blade,
    Palette,
    Effects,
}

/// Parse TOML text into a validated [`SaberConfig`]
///
/// Keys that are absent keep their default values. A `[palette]` section
/// replaces the default palette entirely.
pub fn parse_config(input: &str) -> Result<SaberConfig, ParseError> {
    let mut config = SaberConfig::default();
    let mut section = Section::Root;
    let mut palette_started = false;

    for (index, raw) in input.lines().enumerate() {
        let line_no = (index + 1).min(u16::MAX as usize) as u16;
        let line = raw.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            let header = strip_comment(line);
            if !header.ends_with(']') {
                return Err(ParseError::Syntax { line: line_no });
            }
            section = parse_section_header(&header[1..header.len() - 1])
                .ok_or(ParseError::InvalidSection { line: line_no })?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::Syntax { line: line_no })?;

        if section == Section::Palette && !palette_started {
            config.blade.palette.clear();
            palette_started = true;
        }

        apply_value(&mut config, section, key, value, line_no)?;
    }

    config.validate()?;
    Ok(config)
}

fn parse_section_header(header: &str) -> Option<Section> {
    match header.trim() {
        "motion" => Some(Section::Motion),
        "button" => Some(Section::Button),
        "blade" => Some(Section::Blade),
        "palette" => Some(Section::Palette),
        "effects" => Some(Section::Effects),
        _ => None,
    }
}

/// Split `key = value`, dropping any trailing comment outside quotes
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, rest) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    let value = strip_comment(rest.trim());
    if value.is_empty() {
        return None;
    }
    Some((key, value))
}

/// Remove a trailing `# comment`, leaving quoted text untouched
fn strip_comment(text: &str) -> &str {
    let mut in_string = false;
    for (i, c) in text.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return text[..i].trim_end(),
            _ => {}
        }
    }
    text.trim_end()
}

fn apply_value(
    config: &mut SaberConfig,
    section: Section,
    key: &str,
    value: &str,
    line: u16,
) -> Result<(), ParseError> {
    let invalid = ParseError::InvalidValue { line };

    match (section, key) {
        (Section::Root, "tick_ms") => config.tick_ms = parse_u32(value).ok_or(invalid)?,

        (Section::Motion, "swing_threshold") => {
            config.motion.swing_threshold = parse_f32(value).ok_or(invalid)?
        }
        (Section::Motion, "clash_threshold") => {
            config.motion.clash_threshold = parse_f32(value).ok_or(invalid)?
        }

        (Section::Button, "long_press_ms") => {
            config.button.long_press_ms = parse_u32(value).ok_or(invalid)?
        }
        (Section::Button, "debounce_polls") => {
            config.button.debounce_polls = parse_u32(value)
                .and_then(|v| u8::try_from(v).ok())
                .ok_or(invalid)?
        }

        (Section::Blade, "pixel_count") => {
            config.blade.pixel_count = parse_u32(value)
                .and_then(|v| u16::try_from(v).ok())
                .ok_or(invalid)?
        }
        (Section::Blade, "brightness") => {
            config.blade.brightness = parse_f32(value).ok_or(invalid)?
        }

        // Palette entries are named for readability only; order is what counts
        (Section::Palette, _) => {
            let color = parse_color(value).ok_or(invalid)?;
            config.blade.palette.push(color)?;
        }

        (Section::Effects, "clash_enabled") => {
            config.effects.clash_enabled = parse_bool(value).ok_or(invalid)?
        }
        (Section::Effects, "hum_level") => {
            config.effects.hum_level = parse_f32(value).ok_or(invalid)?
        }
        (Section::Effects, "effect_level") => {
            config.effects.effect_level = parse_f32(value).ok_or(invalid)?
        }
        (Section::Effects, "ignite_step_ms") => {
            config.effects.ignite_step_ms = parse_u32(value).ok_or(invalid)?
        }
        (Section::Effects, "retract_step_ms") => {
            config.effects.retract_step_ms = parse_u32(value).ok_or(invalid)?
        }
        (Section::Effects, "clash_flash_ms") => {
            config.effects.clash_flash_ms = parse_u32(value).ok_or(invalid)?
        }

        _ => return Err(ParseError::UnknownKey { line }),
    }

    Ok(())
}

/// Integer literals may use `_` separators (`10_000`)
fn parse_u32(value: &str) -> Option<u32> {
    if value.is_empty() || value.starts_with('_') {
        return None;
    }
    value
        .chars()
        .filter(|&c| c != '_')
        .try_fold(0u32, |acc, c| acc.checked_mul(10)?.checked_add(c.to_digit(10)?))
}

fn parse_f32(value: &str) -> Option<f32> {
    let parsed: f32 = value.parse().ok()?;
    parsed.is_finite().then_some(parsed)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Parse `"#RRGGBB"` (quotes required)
fn parse_color(value: &str) -> Option<RGB8> {
    let hex = value.strip_prefix('"')?.strip_suffix('"')?.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(RGB8 {
        r: channel(0)?,
        g: channel(2)?,
        b: channel(4)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::{CYAN, GREEN, RED, YELLOW};

    const SAMPLE: &str = r##"
# Kyber blade configuration
tick_ms = 5

[motion]
swing_threshold = 12.5   # m/s²
clash_threshold = 24.0

[button]
long_press_ms = 750

[blade]
pixel_count = 60
brightness = 0.5

[palette]
purple = "#8000FF"  # first entry is the boot color
white = "#FFFFFF"

[effects]
clash_enabled = false
clash_flash_ms = 150
"##;

    #[test]
    fn test_parse_sample() {
        let config = parse_config(SAMPLE).unwrap();

        assert_eq!(config.tick_ms, 5);
        assert_eq!(config.motion.swing_threshold, 12.5);
        assert_eq!(config.motion.clash_threshold, 24.0);
        assert_eq!(config.button.long_press_ms, 750);
        assert_eq!(config.blade.pixel_count, 60);
        assert_eq!(config.blade.brightness, 0.5);
        assert!(!config.effects.clash_enabled);
        assert_eq!(config.effects.clash_flash_ms, 150);

        assert_eq!(config.blade.palette.len(), 2);
        assert_eq!(config.blade.palette.color(0), RGB8 { r: 0x80, g: 0, b: 0xFF });
        assert_eq!(config.blade.palette.color(1), RGB8 { r: 255, g: 255, b: 255 });
    }

    #[test]
    fn test_empty_input_gives_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, SaberConfig::default());

        let palette = &config.blade.palette;
        assert_eq!(palette.len(), 4);
        for (i, color) in [CYAN, GREEN, RED, YELLOW].into_iter().enumerate() {
            assert_eq!(palette.color(i), color);
        }
    }

    #[test]
    fn test_underscore_integers() {
        let config = parse_config("[button]\nlong_press_ms = 1_000\n").unwrap();
        assert_eq!(config.button.long_press_ms, 1000);
    }

    #[test]
    fn test_unknown_section() {
        assert_eq!(
            parse_config("[sound]\nvolume = 3\n"),
            Err(ParseError::InvalidSection { line: 1 })
        );
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(
            parse_config("[motion]\nshake_threshold = 3.0\n"),
            Err(ParseError::UnknownKey { line: 2 })
        );
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            parse_config("[effects]\nclash_enabled = yes\n"),
            Err(ParseError::InvalidValue { line: 2 })
        );
        assert_eq!(
            parse_config("[palette]\nred = \"#FF00\"\n"),
            Err(ParseError::InvalidValue { line: 2 })
        );
        assert_eq!(
            parse_config("[blade]\npixel_count = 70000\n"),
            Err(ParseError::InvalidValue { line: 2 })
        );
        assert_eq!(
            parse_config("[motion]\nswing_threshold = inf\n"),
            Err(ParseError::InvalidValue { line: 2 })
        );
    }

    #[test]
    fn test_syntax_error() {
        assert_eq!(
            parse_config("[motion\n"),
            Err(ParseError::Syntax { line: 1 })
        );
        assert_eq!(
            parse_config("tick_ms 5\n"),
            Err(ParseError::Syntax { line: 1 })
        );
    }

    #[test]
    fn test_validation_applies() {
        let text = "[motion]\nswing_threshold = 20.0\nclash_threshold = 15.0\n";
        assert_eq!(
            parse_config(text),
            Err(ParseError::Invalid(ConfigError::ThresholdOrder))
        );
    }

    #[test]
    fn test_too_many_colors() {
        let mut text = heapless::String::<512>::new();
        let _ = text.push_str("[palette]\n");
        for _ in 0..9 {
            let _ = text.push_str("c = \"#010203\"\n");
        }
        assert_eq!(
            parse_config(&text),
            Err(ParseError::Invalid(ConfigError::TooManyColors))
        );
    }
}
