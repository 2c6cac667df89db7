//! sRGB device color
//!
//! The encoding every image file and every catalog hex string uses. Channel
//! values are gamma encoded, so no arithmetic is done on this type directly.

use std::fmt;
use std::str::FromStr;

use super::linear_rgb::LinearRgb;
use super::lut::linear_to_srgb;
use crate::palette::ParseColorError;

/// A color in gamma-encoded sRGB, channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    /// Red channel (gamma encoded)
    pub r: f32,
    /// Green channel (gamma encoded)
    pub g: f32,
    /// Blue channel (gamma encoded)
    pub b: f32,
}

impl Srgb {
    #[inline]
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create a color from 8-bit channel values.
    ///
    /// ```
    /// use chroma_fingerprint::Srgb;
    /// let red = Srgb::from_u8(255, 0, 0);
    /// assert_eq!(red.r, 1.0);
    /// ```
    #[inline]
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Create a color from an `[R, G, B]` byte triple.
    #[inline]
    pub fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::from_u8(bytes[0], bytes[1], bytes[2])
    }

    /// Quantize to an `[R, G, B]` byte triple, rounding and clamping.
    #[inline]
    pub fn to_bytes(self) -> [u8; 3] {
        [
            (self.r * 255.0).round().clamp(0.0, 255.0) as u8,
            (self.g * 255.0).round().clamp(0.0, 255.0) as u8,
            (self.b * 255.0).round().clamp(0.0, 255.0) as u8,
        ]
    }

    /// Format as an uppercase `#RRGGBB` string.
    ///
    /// ```
    /// use chroma_fingerprint::Srgb;
    /// assert_eq!(Srgb::from_u8(145, 120, 119).to_hex(), "#917877");
    /// ```
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_bytes();
        format!("#{r:02X}{g:02X}{b:02X}")
    }
}

impl From<LinearRgb> for Srgb {
    /// Gamma-encode linear light. Channels outside `0.0..=1.0` are clamped.
    fn from(linear: LinearRgb) -> Self {
        Self {
            r: linear_to_srgb(linear.r as f32),
            g: linear_to_srgb(linear.g as f32),
            b: linear_to_srgb(linear.b as f32),
        }
    }
}

impl FromStr for Srgb {
    type Err = ParseColorError;

    /// Parse `#RRGGBB`, `RRGGBB`, `#RGB` or `RGB` (case-insensitive,
    /// surrounding whitespace ignored).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        if !s.is_ascii() {
            return Err(ParseColorError::InvalidLength);
        }

        match s.len() {
            3 => {
                let r = u8::from_str_radix(&s[0..1], 16)? * 17;
                let g = u8::from_str_radix(&s[1..2], 16)? * 17;
                let b = u8::from_str_radix(&s[2..3], 16)? * 17;
                Ok(Self::from_u8(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&s[0..2], 16)?;
                let g = u8::from_str_radix(&s[2..4], 16)?;
                let b = u8::from_str_radix(&s[4..6], 16)?;
                Ok(Self::from_u8(r, g, b))
            }
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}

impl fmt::Display for Srgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_round_trip_through_linear() {
        for i in 0..=255u8 {
            let original = Srgb::from_u8(i, i, i);
            let back = Srgb::from(LinearRgb::from(original)).to_bytes();
            let error = (back[0] as i32 - i as i32).abs();
            assert!(error <= 1, "value {i} came back as {}", back[0]);
        }
    }

    #[test]
    fn test_hex_parsing() {
        let white: Srgb = "#FFFFFF".parse().unwrap();
        assert_eq!(white.to_bytes(), [255, 255, 255]);

        let plum: Srgb = "917877".parse().unwrap();
        assert_eq!(plum.to_bytes(), [0x91, 0x78, 0x77]);

        let short: Srgb = "#abc".parse().unwrap();
        assert_eq!(short, Srgb::from_u8(0xAA, 0xBB, 0xCC));

        let padded: Srgb = "  #003854 ".parse().unwrap();
        assert_eq!(padded.to_bytes(), [0x00, 0x38, 0x54]);
    }

    #[test]
    fn test_hex_parsing_errors() {
        assert!(matches!(
            "#GGG".parse::<Srgb>(),
            Err(ParseColorError::InvalidHex(_))
        ));
        assert!(matches!(
            "#FFFF".parse::<Srgb>(),
            Err(ParseColorError::InvalidLength)
        ));
        assert!(matches!(
            "".parse::<Srgb>(),
            Err(ParseColorError::InvalidLength)
        ));
        assert!(matches!(
            "#ÄÄÄ".parse::<Srgb>(),
            Err(ParseColorError::InvalidLength)
        ));
    }

    #[test]
    fn test_hex_formatting() {
        assert_eq!(Srgb::from_u8(0, 0, 0).to_hex(), "#000000");
        assert_eq!(Srgb::from_u8(0xAB, 0x2D, 0x3A).to_string(), "#AB2D3A");
    }
}
