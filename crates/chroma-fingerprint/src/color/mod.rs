//! Color types and conversion utilities
//!
//! - **Srgb**: gamma-encoded device values. Use for I/O and hex strings.
//! - **LinearRgb**: linear light, the bridge to XYZ.
//! - **Lab**: CIE L\*a\*b\* (D65). All clustering, statistics and palette
//!   distances are computed here.
//!
//! # Example
//!
//! ```
//! use chroma_fingerprint::{to_device, to_perceptual};
//!
//! let lab = to_perceptual([145, 120, 119]);
//! assert_eq!(to_device(lab), [145, 120, 119]);
//! ```

mod ciede2000;
mod lab;
mod linear_rgb;
mod lut;
mod srgb;

pub use ciede2000::delta_e_2000;
pub use lab::Lab;
pub use linear_rgb::LinearRgb;
pub use srgb::Srgb;

/// Convert an 8-bit sRGB pixel to Lab.
#[inline]
pub fn to_perceptual(pixel: [u8; 3]) -> Lab {
    Lab::from(Srgb::from_bytes(pixel))
}

/// Convert a Lab color to an 8-bit sRGB pixel.
///
/// Out-of-gamut colors are clamped onto the sRGB cube before rounding.
#[inline]
pub fn to_device(lab: Lab) -> [u8; 3] {
    Srgb::from(lab).to_bytes()
}
