use std::{fmt, str::FromStr};

use crate::foundation::error::{WavegramError, WavegramResult};

/// Opaque 8-bit sRGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` or `RRGGBB` (case-insensitive).
    pub fn from_hex(s: &str) -> WavegramResult<Self> {
        parse_hex(s).map_err(|e| WavegramError::invalid_color(format!("\"{s}\": {e}")))
    }

    /// Straight-alpha RGBA8 with full opacity.
    pub fn to_rgba8(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

impl FromStr for Rgb8 {
    type Err = WavegramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

fn parse_hex(s: &str) -> Result<Rgb8, String> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);

    if s.len() != 6 || !s.is_ascii() {
        return Err("hex color must be #RRGGBB or RRGGBB".to_owned());
    }

    fn hex_byte(pair: &str) -> Result<u8, String> {
        if !pair.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(format!("invalid hex byte \"{pair}\""));
        }
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    Ok(Rgb8 {
        r: hex_byte(&s[0..2])?,
        g: hex_byte(&s[2..4])?,
        b: hex_byte(&s[4..6])?,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
