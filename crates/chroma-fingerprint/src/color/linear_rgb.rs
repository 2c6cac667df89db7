//! Linear-light RGB
//!
//! The intermediate between the gamma-encoded device values and XYZ. The
//! sRGB primaries are kept; only the transfer curve is removed.

use super::lut::srgb_to_linear;
use super::srgb::Srgb;

/// A color in linear-light RGB with sRGB primaries.
///
/// In-gamut values lie in `0.0..=1.0`; conversions from Lab may produce
/// values outside that range, which are only clamped when encoding back
/// to [`Srgb`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl LinearRgb {
    #[inline]
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// True when every channel lies in `0.0..=1.0` (with a small tolerance
    /// for matrix round-off).
    pub fn in_gamut(&self) -> bool {
        const EPS: f64 = 1e-6;
        [self.r, self.g, self.b]
            .iter()
            .all(|&c| (-EPS..=1.0 + EPS).contains(&c))
    }
}

impl From<Srgb> for LinearRgb {
    /// Remove the sRGB transfer curve via the build-time lookup table.
    fn from(srgb: Srgb) -> Self {
        Self {
            r: srgb_to_linear(srgb.r) as f64,
            g: srgb_to_linear(srgb.g) as f64,
            b: srgb_to_linear(srgb.b) as f64,
        }
    }
}
