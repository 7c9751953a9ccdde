//! Accent colors: the RGB value type, contrast math and the sampler.

mod contrast;
mod sampler;

pub use contrast::{contrast_ratio, highest_contrast, relative_luminance};
pub use sampler::{sample_accent, sample_color, ACCENT_MIN_CONTRAST, MAX_SAMPLE_ATTEMPTS};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseColorError;

/// A 24-bit RGB color, written as `#rrggbb`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(u32);

impl Color {
    pub const WHITE: Color = Color(0xFF_FF_FF);
    pub const BLACK: Color = Color(0x00_00_00);
    /// Background used before any quote has been loaded.
    pub const DEFAULT_ACCENT: Color = Color(0x23_23_23);

    /// Build a color from the low 24 bits of `value`.
    pub const fn from_u24(value: u32) -> Self {
        Self(value & 0xFF_FF_FF)
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    pub const fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn b(self) -> u8 {
        self.0 as u8
    }

    pub fn to_hex(self) -> String {
        format!("#{:06x}", self.0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::DEFAULT_ACCENT
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseColorError(s.to_string());
        let digits = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        match digits.len() {
            6 => u32::from_str_radix(digits, 16)
                .map(Color)
                .map_err(|_| invalid()),
            3 => {
                // #abc expands to #aabbcc
                let expanded: String = digits.chars().flat_map(|c| [c, c]).collect();
                u32::from_str_radix(&expanded, 16)
                    .map(Color)
                    .map_err(|_| invalid())
            }
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_pads_to_six_digits() {
        assert_eq!(Color::from_u24(0xAB).to_string(), "#0000ab");
        assert_eq!(Color::WHITE.to_string(), "#ffffff");
        assert_eq!(Color::DEFAULT_ACCENT.to_hex(), "#232323");
    }

    #[test]
    fn test_parse_long_and_short_forms() {
        assert_eq!("#FFFFFF".parse::<Color>().unwrap(), Color::WHITE);
        assert_eq!("#fff".parse::<Color>().unwrap(), Color::WHITE);
        assert_eq!("#1a2B3c".parse::<Color>().unwrap(), Color::rgb(0x1a, 0x2b, 0x3c));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["ffffff", "#ffff", "#gggggg", "#+12345", "", "#"] {
            assert!(bad.parse::<Color>().is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_channels() {
        let c = Color::rgb(1, 2, 3);
        assert_eq!((c.r(), c.g(), c.b()), (1, 2, 3));
        assert_eq!(Color::from_u24(0x1_00_00_00 | 0x010203), c);
    }

    #[test]
    fn test_serde_uses_hex_string() {
        let json = serde_json::to_string(&Color::rgb(0x12, 0x34, 0x56)).unwrap();
        assert_eq!(json, "\"#123456\"");
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Color::rgb(0x12, 0x34, 0x56));
        assert!(serde_json::from_str::<Color>("\"red\"").is_err());
    }
}
