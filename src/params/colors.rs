//! Water color ramp parameters and the RGB color type.

use std::fmt;
use std::str::FromStr;

/// Errors from parsing `#rrggbb` color strings.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ParseColorError {
    #[error("expected 6 hex digits, got {0:?}")]
    BadLength(String),
    #[error("invalid hex digits in {0:?}")]
    BadDigit(String),
}

/// RGB color with channels in [0, 1] (sRGB-encoded, as authored in hex)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value
    pub fn from_u32(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
        Self::new(channel(16), channel(8), channel(0))
    }

    /// Parse `#rrggbb` (leading `#` optional)
    pub fn from_hex(s: &str) -> Result<Self, ParseColorError> {
        let digits = s.trim().trim_start_matches('#');
        if digits.len() != 6 {
            return Err(ParseColorError::BadLength(s.to_string()));
        }
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ParseColorError::BadDigit(s.to_string()));
        }
        let packed =
            u32::from_str_radix(digits, 16).map_err(|_| ParseColorError::BadDigit(s.to_string()))?;
        Ok(Self::from_u32(packed))
    }

    /// Format as `#rrggbb`, rounding and saturating each channel
    pub fn to_hex(&self) -> String {
        let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", byte(self.r), byte(self.g), byte(self.b))
    }

    /// Linear interpolation; `t = 0` yields `self` and `t = 1` yields `other` exactly
    pub fn mix(&self, other: &Rgb, t: f32) -> Rgb {
        let s = 1.0 - t;
        Rgb::new(
            self.r * s + other.r * t,
            self.g * s + other.g * t,
            self.b * s + other.b * t,
        )
    }

    pub fn to_array(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Depth-to-surface color ramp
#[derive(Debug, Clone)]
pub struct ColorParams {
    /// Color at the crests (mix factor 1)
    pub surface_color: Rgb,

    /// Color in the troughs (mix factor 0)
    pub depth_color: Rgb,

    /// Added to the displacement before scaling
    /// Range: [0, 1]
    pub offset: f32,

    /// Scales the offset displacement into the mix factor
    /// Range: [0, 15]
    pub multiplier: f32,
}

impl Default for ColorParams {
    fn default() -> Self {
        Self {
            surface_color: Rgb::from_u32(0x9bd8ff),
            depth_color: Rgb::from_u32(0x186691),
            offset: 0.322,
            multiplier: 2.39,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_parsing() {
        let c = Rgb::from_hex("#9bd8ff").unwrap();
        assert_eq!(c, Rgb::from_u32(0x9bd8ff));
        assert_eq!(c.to_hex(), "#9bd8ff");
        assert_eq!("186691".parse::<Rgb>().unwrap().to_hex(), "#186691");
    }

    #[test]
    fn test_hex_errors() {
        assert_eq!(
            Rgb::from_hex("#fff"),
            Err(ParseColorError::BadLength("#fff".to_string()))
        );
        assert_eq!(
            Rgb::from_hex("#zzzzzz"),
            Err(ParseColorError::BadDigit("#zzzzzz".to_string()))
        );
    }

    #[test]
    fn test_mix_endpoints_exact() {
        let a = Rgb::from_u32(0x186691);
        let b = Rgb::from_u32(0x9bd8ff);
        assert_eq!(a.mix(&b, 0.0), a);
        assert_eq!(a.mix(&b, 1.0), b);
    }
}
