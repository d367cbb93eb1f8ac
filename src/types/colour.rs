//! Colour type and parsing.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SkinError};

/// An RGBA colour value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    /// Create a new colour from RGBA components.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a new opaque colour from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// White. Every colour matrix cell starts out as this.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Convert unit-range RGBA channels scaled by `mul`.
    pub fn from_scaled_units(channels: [f64; 4], mul: f64) -> Self {
        let [r, g, b, a] = channels.map(|v| (v * 255.0 * mul).round_ties_even() as u8);
        Self { r, g, b, a }
    }

    /// Parse a hex colour string: `#RGB`, `#RGBA`, `#RRGGBB` or `#RRGGBBAA`.
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.trim();
        let hex = s.strip_prefix('#').unwrap_or(s);
        let invalid = || SkinError::Parse {
            message: format!("Invalid hex colour: {}", s),
            help: Some("Use #RGB, #RGBA, #RRGGBB, or #RRGGBBAA format".to_string()),
        };
        if !hex.is_ascii() {
            return Err(invalid());
        }

        let digits = match hex.len() {
            3 | 4 => hex
                .chars()
                .map(|c| c.to_digit(16).map(|d| (d * 17) as u8))
                .collect::<Option<Vec<u8>>>(),
            6 | 8 => (0..hex.len())
                .step_by(2)
                .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).ok())
                .collect::<Option<Vec<u8>>>(),
            _ => None,
        }
        .ok_or_else(invalid)?;

        Ok(Self::new(
            digits[0],
            digits[1],
            digits[2],
            digits.get(3).copied().unwrap_or(255),
        ))
    }

    /// Convert to RGBA array.
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Same colour with a different alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Whether all of R, G and B are above 235.
    pub fn is_near_white(self) -> bool {
        self.r > 235 && self.g > 235 && self.b > 235
    }
}

impl FromStr for Colour {
    type Err = SkinError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}
