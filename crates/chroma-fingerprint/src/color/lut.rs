//! Transfer-function lookup tables
//!
//! The tables are generated at compile time by `build.rs`. Lookups
//! interpolate linearly between adjacent entries.

include!(concat!(env!("OUT_DIR"), "/transfer_lut.rs"));

const LAST: usize = 4095;

#[inline]
fn lookup(table: &[f32; 4096], x: f32) -> f32 {
    let scaled = x.clamp(0.0, 1.0) * LAST as f32;
    let index = scaled as usize;
    if index >= LAST {
        return table[LAST];
    }
    let frac = scaled - index as f32;
    let lo = table[index];
    let hi = table[index + 1];
    lo + (hi - lo) * frac
}

/// Decode an sRGB channel value (0.0..=1.0) to linear light.
///
/// Inputs outside the unit range are clamped.
#[inline]
pub fn srgb_to_linear(encoded: f32) -> f32 {
    lookup(&DECODE_LUT, encoded)
}

/// Encode a linear light value (0.0..=1.0) to an sRGB channel value.
///
/// Inputs outside the unit range are clamped, which is how out-of-gamut
/// Lab colors get mapped back onto the device cube.
#[inline]
pub fn linear_to_srgb(linear: f32) -> f32 {
    lookup(&ENCODE_LUT, linear)
}
