//! CIEDE2000 color difference (CIE 142-2001)
//!
//! Parametric factors kL = kC = kH = 1. The result is symmetric and zero
//! only for identical colors.

#![allow(clippy::excessive_precision)]

use super::lab::Lab;

/// 25^7
const POW25_7: f64 = 6_103_515_625.0;

/// Compute ΔE00 between two Lab colors.
pub fn delta_e_2000(lab1: Lab, lab2: Lab) -> f64 {
    let c1 = lab1.a.hypot(lab1.b);
    let c2 = lab2.a.hypot(lab2.b);
    let c_mean7 = ((c1 + c2) / 2.0).powi(7);
    let g = 0.5 * (1.0 - (c_mean7 / (c_mean7 + POW25_7)).sqrt());

    let a1p = lab1.a * (1.0 + g);
    let a2p = lab2.a * (1.0 + g);
    let c1p = a1p.hypot(lab1.b);
    let c2p = a2p.hypot(lab2.b);
    let h1p = Lab::new(lab1.l, a1p, lab1.b).hue();
    let h2p = Lab::new(lab2.l, a2p, lab2.b).hue();

    let achromatic = c1p * c2p == 0.0;

    let dl = lab2.l - lab1.l;
    let dc = c2p - c1p;
    let dh = if achromatic {
        0.0
    } else {
        let d = h2p - h1p;
        if d > 180.0 {
            d - 360.0
        } else if d < -180.0 {
            d + 360.0
        } else {
            d
        }
    };
    let dh_big = 2.0 * (c1p * c2p).sqrt() * (dh.to_radians() / 2.0).sin();

    let l_mean = (lab1.l + lab2.l) / 2.0;
    let c_mean = (c1p + c2p) / 2.0;
    let h_mean = if achromatic {
        h1p + h2p
    } else if (h1p - h2p).abs() <= 180.0 {
        (h1p + h2p) / 2.0
    } else if h1p + h2p < 360.0 {
        (h1p + h2p + 360.0) / 2.0
    } else {
        (h1p + h2p - 360.0) / 2.0
    };

    let t = 1.0 - 0.17 * (h_mean - 30.0).to_radians().cos()
        + 0.24 * (2.0 * h_mean).to_radians().cos()
        + 0.32 * (3.0 * h_mean + 6.0).to_radians().cos()
        - 0.20 * (4.0 * h_mean - 63.0).to_radians().cos();

    let l50 = (l_mean - 50.0).powi(2);
    let sl = 1.0 + 0.015 * l50 / (20.0 + l50).sqrt();
    let sc = 1.0 + 0.045 * c_mean;
    let sh = 1.0 + 0.015 * c_mean * t;

    let d_theta = 30.0 * (-((h_mean - 275.0) / 25.0).powi(2)).exp();
    let c_mean_p7 = c_mean.powi(7);
    let rc = 2.0 * (c_mean_p7 / (c_mean_p7 + POW25_7)).sqrt();
    let rt = -(2.0 * d_theta).to_radians().sin() * rc;

    let tl = dl / sl;
    let tc = dc / sc;
    let th = dh_big / sh;

    (tl * tl + tc * tc + th * th + rt * tc * th).max(0.0).sqrt()
}
