//! CIE L*a*b* (D65)
//!
//! The perceptual space every extracted and reference color lives in.
//! Lightness runs from 0 (black) to 100 (white); `a` is the green-red axis
//! and `b` the blue-yellow axis, practically within about -128..128.
//!
//! # Conversion path
//!
//! ```text
//! Srgb --(transfer LUT)--> LinearRgb --(sRGB/D65 matrix)--> XYZ --(CIE f)--> Lab
//! ```
//!
//! The inverse runs the same steps backwards; only the final 8-bit
//! quantization in [`Srgb::to_bytes`] loses information.

use super::ciede2000::delta_e_2000;
use super::linear_rgb::LinearRgb;
use super::srgb::Srgb;

/// D65 reference white, Y normalized to 1.
const WHITE_X: f64 = 0.95047;
const WHITE_Y: f64 = 1.0;
const WHITE_Z: f64 = 1.08883;

const DELTA: f64 = 6.0 / 29.0;

/// A color in CIE L*a*b* under the D65 illuminant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    /// Lightness, 0.0..=100.0 for in-gamut colors
    pub l: f64,
    /// Green (negative) to red (positive)
    pub a: f64,
    /// Blue (negative) to yellow (positive)
    pub b: f64,
}

impl Lab {
    #[inline]
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// Chroma, `sqrt(a² + b²)`. This is the "saturation" reported in the
    /// image statistics.
    #[inline]
    pub fn chroma(self) -> f64 {
        self.a.hypot(self.b)
    }

    /// Hue angle in degrees, `0.0..360.0`. Achromatic colors report 0.
    #[inline]
    pub fn hue(self) -> f64 {
        if self.a == 0.0 && self.b == 0.0 {
            return 0.0;
        }
        self.b.atan2(self.a).to_degrees().rem_euclid(360.0)
    }

    /// Squared Euclidean distance. This is the k-means metric; palette
    /// matching uses [`Lab::delta_e`] instead.
    #[inline]
    pub fn distance_squared(self, other: Lab) -> f64 {
        let dl = self.l - other.l;
        let da = self.a - other.a;
        let db = self.b - other.b;
        dl * dl + da * da + db * db
    }

    /// CIEDE2000 color difference to `other`.
    #[inline]
    pub fn delta_e(self, other: Lab) -> f64 {
        delta_e_2000(self, other)
    }
}

#[inline]
fn lab_f(t: f64) -> f64 {
    if t > DELTA * DELTA * DELTA {
        t.cbrt()
    } else {
        t / (3.0 * DELTA * DELTA) + 4.0 / 29.0
    }
}

#[inline]
fn lab_f_inv(t: f64) -> f64 {
    if t > DELTA {
        t * t * t
    } else {
        3.0 * DELTA * DELTA * (t - 4.0 / 29.0)
    }
}

impl From<LinearRgb> for Lab {
    fn from(rgb: LinearRgb) -> Self {
        let x = 0.4124564 * rgb.r + 0.3575761 * rgb.g + 0.1804375 * rgb.b;
        let y = 0.2126729 * rgb.r + 0.7151522 * rgb.g + 0.0721750 * rgb.b;
        let z = 0.0193339 * rgb.r + 0.1191920 * rgb.g + 0.9503041 * rgb.b;

        let fx = lab_f(x / WHITE_X);
        let fy = lab_f(y / WHITE_Y);
        let fz = lab_f(z / WHITE_Z);

        Lab {
            l: 116.0 * fy - 16.0,
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }
}

impl From<Lab> for LinearRgb {
    /// Not clamped: out-of-gamut Lab colors give channels outside `0..=1`.
    fn from(lab: Lab) -> Self {
        let fy = (lab.l + 16.0) / 116.0;
        let fx = fy + lab.a / 500.0;
        let fz = fy - lab.b / 200.0;

        let x = WHITE_X * lab_f_inv(fx);
        let y = WHITE_Y * lab_f_inv(fy);
        let z = WHITE_Z * lab_f_inv(fz);

        LinearRgb {
            r: 3.2404542 * x - 1.5371385 * y - 0.4985314 * z,
            g: -0.9692660 * x + 1.8760108 * y + 0.0415560 * z,
            b: 0.0556434 * x - 0.2040259 * y + 1.0572252 * z,
        }
    }
}

impl From<Srgb> for Lab {
    #[inline]
    fn from(srgb: Srgb) -> Self {
        Lab::from(LinearRgb::from(srgb))
    }
}

impl From<Lab> for Srgb {
    /// Out-of-gamut colors are clamped channel-wise onto the sRGB cube.
    #[inline]
    fn from(lab: Lab) -> Self {
        Srgb::from(LinearRgb::from(lab))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REFERENCE_TOLERANCE: f64 = 0.05;

    #[test]
    fn test_matches_palette_crate() {
        use palette::white_point::D65;
        use palette::{IntoColor, Lab as RefLab, Srgb as RefSrgb};

        let samples: [[u8; 3]; 8] = [
            [255, 0, 0],
            [0, 255, 0],
            [0, 0, 255],
            [128, 128, 128],
            [255, 255, 255],
            [0, 0, 0],
            [0x91, 0x78, 0x77],
            [0x00, 0xA4, 0x97],
        ];

        for [r, g, b] in samples {
            let ours = Lab::from(Srgb::from_u8(r, g, b));
            let reference: RefLab<D65, f64> =
                RefSrgb::new(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0).into_color();

            assert!(
                (ours.l - reference.l).abs() < REFERENCE_TOLERANCE,
                "L mismatch for {:?}: ours={}, palette={}",
                [r, g, b],
                ours.l,
                reference.l
            );
            assert!(
                (ours.a - reference.a).abs() < REFERENCE_TOLERANCE,
                "a mismatch for {:?}: ours={}, palette={}",
                [r, g, b],
                ours.a,
                reference.a
            );
            assert!(
                (ours.b - reference.b).abs() < REFERENCE_TOLERANCE,
                "b mismatch for {:?}: ours={}, palette={}",
                [r, g, b],
                ours.b,
                reference.b
            );
        }
    }

    #[test]
    fn test_known_values() {
        let white = Lab::from(Srgb::from_u8(255, 255, 255));
        assert!((white.l - 100.0).abs() < 0.01);
        assert!(white.a.abs() < 0.01 && white.b.abs() < 0.01);

        let black = Lab::from(Srgb::from_u8(0, 0, 0));
        assert!(black.l.abs() < 0.01);

        // sRGB red is roughly (53.24, 80.09, 67.20)
        let red = Lab::from(Srgb::from_u8(255, 0, 0));
        assert!((red.l - 53.24).abs() < 0.05);
        assert!((red.a - 80.09).abs() < 0.05);
        assert!((red.b - 67.20).abs() < 0.05);
    }

    #[test]
    fn test_grays_are_achromatic() {
        for v in [16u8, 64, 128, 200, 250] {
            let gray = Lab::from(Srgb::from_u8(v, v, v));
            assert!(gray.chroma() < 0.01, "gray {v} has chroma {}", gray.chroma());
        }
    }

    #[test]
    fn test_device_round_trip_within_one_step() {
        for r in (0..=255u16).step_by(15) {
            for g in (0..=255u16).step_by(15) {
                for b in (0..=255u16).step_by(15) {
                    let original = [r as u8, g as u8, b as u8];
                    let lab = Lab::from(Srgb::from_bytes(original));
                    let back = Srgb::from(lab).to_bytes();
                    for ch in 0..3 {
                        let diff = (back[ch] as i32 - original[ch] as i32).abs();
                        assert!(diff <= 1, "{original:?} -> {lab:?} -> {back:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_perceptual_round_trip_within_one_unit() {
        let samples = [
            Lab::new(50.0, 20.0, -30.0),
            Lab::new(75.0, -10.0, 15.0),
            Lab::new(30.0, 5.0, 5.0),
            Lab::new(90.0, 0.0, 0.0),
        ];
        for lab in samples {
            assert!(LinearRgb::from(lab).in_gamut(), "{lab:?} must be in gamut");
            let back = Lab::from(Srgb::from_bytes(Srgb::from(lab).to_bytes()));
            assert!((back.l - lab.l).abs() <= 1.0, "{lab:?} -> {back:?}");
            assert!((back.a - lab.a).abs() <= 1.0, "{lab:?} -> {back:?}");
            assert!((back.b - lab.b).abs() <= 1.0, "{lab:?} -> {back:?}");
        }
    }

    #[test]
    fn test_out_of_gamut_is_clamped() {
        let lab = Lab::new(50.0, 120.0, 120.0);
        assert!(!LinearRgb::from(lab).in_gamut());
        let srgb = Srgb::from(lab);
        for c in [srgb.r, srgb.g, srgb.b] {
            assert!((0.0..=1.0).contains(&c));
        }
    }

    #[test]
    fn test_chroma_and_hue() {
        let lab = Lab::new(50.0, 3.0, 4.0);
        assert!((lab.chroma() - 5.0).abs() < 1e-12);

        assert!((Lab::new(50.0, 0.0, 10.0).hue() - 90.0).abs() < 1e-9);
        assert!((Lab::new(50.0, 0.0, -10.0).hue() - 270.0).abs() < 1e-9);
        assert_eq!(Lab::new(50.0, 0.0, 0.0).hue(), 0.0);
    }
}
