use std::collections::HashMap;
use std::time::Duration;

use chrono_tz::Tz;
use clockface_attrs::{Attr, ParseError, StyleBlock, StyleSheet};
use clockface_engine::paint::Color;
use thiserror::Error;

/// Default block name looked up by [`ClockStyle::parse`] callers.
pub const CLOCK_BLOCK: &str = "Clock";

/// Attribute names kept from the original Android schema, mapped to the
/// keys they stand for.
const ALIASES: [(&str, &str); 6] = [
    ("colorBLUE", "hour_color"),
    ("colorRED", "minute_color"),
    ("colorGREEN", "second_color"),
    ("size20", "hour_width"),
    ("size10", "minute_width"),
    ("size5", "second_width"),
];

/// Invalid clock styling, reported at construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StyleError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("style block `{0}` not found")]
    MissingBlock(String),

    #[error("{line}:{col}: unknown clock attribute `{key}`")]
    UnknownAttribute { key: String, line: usize, col: usize },

    #[error("{line}:{col}: `{key}` and `{other}` set the same property")]
    Conflicting { key: String, other: String, line: usize, col: usize },

    #[error("{line}:{col}: `{key}` expects a {expected}, got a {found}")]
    WrongType {
        key: String,
        expected: &'static str,
        found: &'static str,
        line: usize,
        col: usize,
    },

    #[error("{line}:{col}: `{key}` must be a finite number {requirement}, got {value}")]
    InvalidNumber {
        key: String,
        value: f32,
        requirement: &'static str,
        line: usize,
        col: usize,
    },

    #[error("{hand} hand would be invisible: {reason}")]
    InvisibleHand { hand: &'static str, reason: &'static str },

    #[error("{line}:{col}: unknown time zone {name:?}")]
    UnknownTimeZone { name: String, line: usize, col: usize },

    #[error("{line}:{col}: `refresh_ms` must be a whole number of milliseconds >= 1, got {value}")]
    InvalidRefresh { value: f32, line: usize, col: usize },
}

/// Stroke color and width of one hand.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HandStyle {
    pub color: Color,
    pub width: f32,
}

impl HandStyle {
    pub fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }
}

/// Construction-time clock styling. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct ClockStyle {
    pub hour: HandStyle,
    pub minute: HandStyle,
    pub second: HandStyle,
    pub dial_color: Color,
    /// Stroke width of the dial circle; also sets the radius inset.
    pub dial_width: f32,
    pub hour_tick_width: f32,
    pub minute_tick_width: f32,
    /// Diameter of the center dot.
    pub dot_width: f32,
    pub label_size: f32,
    pub label_color: Color,
    pub time_zone: Tz,
    pub refresh: Duration,
}

impl Default for ClockStyle {
    fn default() -> Self {
        Self {
            hour: HandStyle::new(Color::from_srgb_u8(0, 0, 255, 255), 20.0),
            minute: HandStyle::new(Color::from_srgb_u8(255, 0, 0, 255), 10.0),
            second: HandStyle::new(Color::from_srgb_u8(0, 255, 0, 255), 5.0),
            dial_color: Color::black(),
            dial_width: 10.0,
            hour_tick_width: 10.0,
            minute_tick_width: 5.0,
            dot_width: 30.0,
            label_size: 40.0,
            label_color: Color::black(),
            time_zone: chrono_tz::Europe::Moscow,
            refresh: Duration::from_millis(1000),
        }
    }
}

impl ClockStyle {
    /// Parses `src` and resolves the block named `block`.
    pub fn parse(src: &str, block: &str) -> Result<Self, StyleError> {
        let sheet = clockface_attrs::parse_str(src)?;
        Self::from_sheet(&sheet, block)
    }

    pub fn from_sheet(sheet: &StyleSheet, block: &str) -> Result<Self, StyleError> {
        let block = sheet
            .get(block)
            .ok_or_else(|| StyleError::MissingBlock(block.to_string()))?;
        Self::from_block(block)
    }

    /// Applies a block over the defaults and validates the result.
    pub fn from_block(block: &StyleBlock) -> Result<Self, StyleError> {
        let mut style = Self::default();
        let mut seen: HashMap<&str, &Attr> = HashMap::new();

        for attr in &block.attrs {
            let key = canonical_key(&attr.key);
            if let Some(prev) = seen.insert(key, attr) {
                return Err(StyleError::Conflicting {
                    key: attr.key.clone(),
                    other: prev.key.clone(),
                    line: attr.line,
                    col: attr.col,
                });
            }
            style.apply(key, attr)?;
        }

        let defaulted: Vec<&str> = KEYS.iter().copied().filter(|k| !seen.contains_key(k)).collect();
        if !defaulted.is_empty() {
            log::debug!("clock style `{}`: defaults for {}", block.name, defaulted.join(", "));
        }

        style.validate()?;
        Ok(style)
    }

    /// Hands must be visible: non-zero width and non-transparent color.
    pub fn validate(&self) -> Result<(), StyleError> {
        for (hand, style) in [("hour", &self.hour), ("minute", &self.minute), ("second", &self.second)] {
            if !(style.width > 0.0) {
                return Err(StyleError::InvisibleHand { hand, reason: "zero width" });
            }
            if !style.color.is_visible() {
                return Err(StyleError::InvisibleHand { hand, reason: "fully transparent color" });
            }
        }
        Ok(())
    }

    fn apply(&mut self, key: &str, attr: &Attr) -> Result<(), StyleError> {
        match key {
            "hour_color" => self.hour.color = color(attr)?,
            "hour_width" => self.hour.width = width(attr)?,
            "minute_color" => self.minute.color = color(attr)?,
            "minute_width" => self.minute.width = width(attr)?,
            "second_color" => self.second.color = color(attr)?,
            "second_width" => self.second.width = width(attr)?,
            "dial_color" => self.dial_color = color(attr)?,
            "dial_width" => self.dial_width = width(attr)?,
            "hour_tick_width" => self.hour_tick_width = width(attr)?,
            "minute_tick_width" => self.minute_tick_width = width(attr)?,
            "dot_width" => self.dot_width = width(attr)?,
            "label_size" => self.label_size = positive(attr)?,
            "label_color" => self.label_color = color(attr)?,
            "time_zone" => self.time_zone = zone(attr)?,
            "refresh_ms" => self.refresh = refresh(attr)?,
            _ => {
                return Err(StyleError::UnknownAttribute {
                    key: attr.key.clone(),
                    line: attr.line,
                    col: attr.col,
                });
            }
        }
        Ok(())
    }
}

const KEYS: [&str; 15] = [
    "hour_color",
    "hour_width",
    "minute_color",
    "minute_width",
    "second_color",
    "second_width",
    "dial_color",
    "dial_width",
    "hour_tick_width",
    "minute_tick_width",
    "dot_width",
    "label_size",
    "label_color",
    "time_zone",
    "refresh_ms",
];

fn canonical_key(key: &str) -> &str {
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map_or(key, |(_, canonical)| canonical)
}

// ── value coercion ────────────────────────────────────────────────────────

fn wrong_type(attr: &Attr, expected: &'static str) -> StyleError {
    StyleError::WrongType {
        key: attr.key.clone(),
        expected,
        found: attr.value.kind(),
        line: attr.line,
        col: attr.col,
    }
}

fn number(attr: &Attr) -> Result<f32, StyleError> {
    attr.value.as_number().ok_or_else(|| wrong_type(attr, "number"))
}

fn invalid_number(attr: &Attr, value: f32, requirement: &'static str) -> StyleError {
    StyleError::InvalidNumber {
        key: attr.key.clone(),
        value,
        requirement,
        line: attr.line,
        col: attr.col,
    }
}

fn width(attr: &Attr) -> Result<f32, StyleError> {
    let w = number(attr)?;
    if w.is_finite() && w >= 0.0 { Ok(w) } else { Err(invalid_number(attr, w, ">= 0")) }
}

fn positive(attr: &Attr) -> Result<f32, StyleError> {
    let v = number(attr)?;
    if v.is_finite() && v > 0.0 { Ok(v) } else { Err(invalid_number(attr, v, "> 0")) }
}

fn color(attr: &Attr) -> Result<Color, StyleError> {
    attr.value
        .as_color()
        .map(Color::from_rgba_bytes)
        .ok_or_else(|| wrong_type(attr, "color"))
}

fn zone(attr: &Attr) -> Result<Tz, StyleError> {
    let name = attr.value.as_str().ok_or_else(|| wrong_type(attr, "string"))?;
    name.parse::<Tz>().map_err(|_| StyleError::UnknownTimeZone {
        name: name.to_string(),
        line: attr.line,
        col: attr.col,
    })
}

fn refresh(attr: &Attr) -> Result<Duration, StyleError> {
    let ms = number(attr)?;
    if !ms.is_finite() || ms < 1.0 || ms.fract() != 0.0 {
        return Err(StyleError::InvalidRefresh { value: ms, line: attr.line, col: attr.col });
    }
    Ok(Duration::from_millis(ms as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style(body: &str) -> Result<ClockStyle, StyleError> {
        ClockStyle::parse(&format!("Clock {{ {body} }}"), CLOCK_BLOCK)
    }

    #[test]
    fn empty_block_yields_defaults() {
        assert_eq!(style("").unwrap(), ClockStyle::default());
    }

    #[test]
    fn defaults_match_hand_attribute_names() {
        let s = ClockStyle::default();
        assert_eq!((s.hour.width, s.minute.width, s.second.width), (20.0, 10.0, 5.0));
        assert_eq!(s.hour.color, Color::from_rgba_bytes([0, 0, 255, 255]));
        assert_eq!(s.minute.color, Color::from_rgba_bytes([255, 0, 0, 255]));
        assert_eq!(s.second.color, Color::from_rgba_bytes([0, 255, 0, 255]));
        assert_eq!(s.refresh, Duration::from_secs(1));
        assert_eq!(s.time_zone, chrono_tz::Europe::Moscow);
    }

    #[test]
    fn canonical_keys_override_defaults() {
        let s = style(r#"hour_color: #102030  hour_width: 12  time_zone: "Asia/Tokyo"  refresh_ms: 250"#)
            .unwrap();
        assert_eq!(s.hour, HandStyle::new(Color::from_rgba_bytes([0x10, 0x20, 0x30, 0xff]), 12.0));
        assert_eq!(s.time_zone, chrono_tz::Asia::Tokyo);
        assert_eq!(s.refresh, Duration::from_millis(250));
    }

    #[test]
    fn android_aliases_map_to_hands() {
        let s = style("colorRED: #00ff00  size5: 3").unwrap();
        assert_eq!(s.minute.color, Color::from_rgba_bytes([0, 255, 0, 255]));
        assert_eq!(s.second.width, 3.0);
    }

    #[test]
    fn alias_and_canonical_key_conflict() {
        let e = style("size20: 4  hour_width: 5").unwrap_err();
        assert!(matches!(e, StyleError::Conflicting { ref key, ref other, .. }
            if key == "hour_width" && other == "size20"));
    }

    #[test]
    fn unknown_attribute_reports_position() {
        let e = ClockStyle::parse("Clock {\n  hour_colour: #ffffff\n}", CLOCK_BLOCK).unwrap_err();
        assert_eq!(e, StyleError::UnknownAttribute { key: "hour_colour".into(), line: 2, col: 3 });
    }

    #[test]
    fn wrong_value_type() {
        let e = style("hour_width: #ffffff").unwrap_err();
        assert!(matches!(e, StyleError::WrongType { expected: "number", found: "color", .. }));
    }

    #[test]
    fn negative_width_rejected() {
        assert!(matches!(style("dial_width: -1").unwrap_err(), StyleError::InvalidNumber { .. }));
    }

    #[test]
    fn invisible_hands_rejected() {
        assert_eq!(
            style("second_width: 0").unwrap_err(),
            StyleError::InvisibleHand { hand: "second", reason: "zero width" }
        );
        assert!(matches!(
            style("hour_color: #0000ff00").unwrap_err(),
            StyleError::InvisibleHand { hand: "hour", .. }
        ));
    }

    #[test]
    fn unknown_zone_rejected() {
        assert!(matches!(
            style(r#"time_zone: "Mars/Olympus""#).unwrap_err(),
            StyleError::UnknownTimeZone { .. }
        ));
    }

    #[test]
    fn zero_refresh_rejected() {
        assert!(matches!(style("refresh_ms: 0").unwrap_err(), StyleError::InvalidRefresh { .. }));
        assert!(matches!(style("refresh_ms: 2.5").unwrap_err(), StyleError::InvalidRefresh { .. }));
    }

    #[test]
    fn missing_block_and_parse_errors_surface() {
        assert_eq!(
            ClockStyle::parse("Other { }", CLOCK_BLOCK).unwrap_err(),
            StyleError::MissingBlock("Clock".into())
        );
        assert!(matches!(ClockStyle::parse("Clock {", CLOCK_BLOCK), Err(StyleError::Parse(_))));
    }
}
