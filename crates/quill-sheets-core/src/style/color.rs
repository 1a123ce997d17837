//! Color representation

use crate::error::{Error, Result};

/// A cell/font/border color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Color {
    /// Automatic color (theme default)
    #[default]
    Auto,
    /// Explicit RGB color
    Rgb { r: u8, g: u8, b: u8 },
}

impl Color {
    pub const BLACK: Color = Color::Rgb { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color::Rgb {
        r: 255,
        g: 255,
        b: 255,
    };
    pub const RED: Color = Color::Rgb { r: 255, g: 0, b: 0 };
    pub const GREEN: Color = Color::Rgb { r: 0, g: 128, b: 0 };
    pub const BLUE: Color = Color::Rgb { r: 0, g: 0, b: 255 };
    pub const GRAY: Color = Color::Rgb {
        r: 128,
        g: 128,
        b: 128,
    };

    /// Create an RGB color
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb { r, g, b }
    }

    /// Parse a "#RRGGBB" or "RRGGBB" hex string
    pub fn from_hex(s: &str) -> Result<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::InvalidStyle(format!("invalid hex color '{}'", s)));
        }
        let r = u8::from_str_radix(&hex[0..2], 16).expect("validated hex");
        let g = u8::from_str_radix(&hex[2..4], 16).expect("validated hex");
        let b = u8::from_str_radix(&hex[4..6], 16).expect("validated hex");
        Ok(Color::Rgb { r, g, b })
    }

    /// Render as an ARGB hex string ("FFRRGGBB"); `Auto` has no fixed value
    pub fn argb_hex(&self) -> Option<String> {
        match self {
            Color::Auto => None,
            Color::Rgb { r, g, b } => Some(format!("FF{:02X}{:02X}{:02X}", r, g, b)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        assert_eq!(Color::from_hex("#FF0000").unwrap(), Color::RED);
        assert_eq!(Color::from_hex("ff0000").unwrap(), Color::RED);
        assert!(Color::from_hex("#F00").is_err());
        assert!(Color::from_hex("nothex").is_err());
    }

    #[test]
    fn test_argb_hex() {
        assert_eq!(Color::rgb(1, 2, 3).argb_hex().unwrap(), "FF010203");
        assert_eq!(Color::Auto.argb_hex(), None);
    }
}
