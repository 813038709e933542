//! Header row formatting: bold weight and a background colour.

use crate::error::{ClassBankError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

fn hex_color_re() -> &'static Regex {
    static HEX_RE: OnceLock<Regex> = OnceLock::new();
    HEX_RE.get_or_init(|| {
        Regex::new(r"^#([0-9A-Fa-f]{2})([0-9A-Fa-f]{2})([0-9A-Fa-f]{2})$")
            .expect("hex color regex must compile")
    })
}

/// An RGB colour written as `#RRGGBB`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /// Parse a `#RRGGBB` string (hex digits in either case).
    pub fn parse(s: &str) -> Result<Self> {
        let caps = hex_color_re()
            .captures(s.trim())
            .ok_or_else(|| ClassBankError::InvalidColor(s.to_string()))?;
        let channel = |idx: usize| {
            u8::from_str_radix(&caps[idx], 16).map_err(|_| ClassBankError::InvalidColor(s.to_string()))
        };
        Ok(Color::rgb(channel(1)?, channel(2)?, channel(3)?))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Color {
    type Error = ClassBankError;

    fn try_from(value: String) -> Result<Self> {
        Color::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Styling applied to a sheet's header row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderFormat {
    pub bold: bool,
    pub background: Color,
}

impl HeaderFormat {
    pub fn bold_on(background: Color) -> Self {
        HeaderFormat {
            bold: true,
            background,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_both_cases() {
        assert_eq!(Color::parse("#d9ead3").unwrap(), Color::rgb(0xD9, 0xEA, 0xD3));
        assert_eq!(Color::parse("#FFF2CC").unwrap(), Color::rgb(0xFF, 0xF2, 0xCC));
    }

    #[test]
    fn display_is_upper_case_hex() {
        assert_eq!(Color::rgb(0x0a, 0xbc, 0x01).to_string(), "#0ABC01");
    }

    #[test]
    fn parse_rejects_malformed_values() {
        for bad in ["", "D9EAD3", "#D9EAD", "#D9EAD3FF", "#GGGGGG", "red"] {
            assert!(
                matches!(Color::parse(bad), Err(ClassBankError::InvalidColor(_))),
                "accepted {bad:?}"
            );
        }
    }
}
