//! Distinct-color histogram
//!
//! Identical pixels contribute identically to every k-means step, so the
//! extractor clusters each distinct sRGB color once, weighted by its count.
//! A 256x256 photograph typically collapses to a few thousand entries.

use super::LightnessWindow;
use crate::color::{to_perceptual, Lab};

/// Distinct colors of an image sorted by their `[R, G, B]` bytes.
#[derive(Debug, Clone, Default)]
pub(crate) struct ColorHistogram {
    pub(crate) bytes: Vec<[u8; 3]>,
    pub(crate) lab: Vec<Lab>,
    pub(crate) counts: Vec<u64>,
    pub(crate) total: u64,
}

#[inline]
fn pack([r, g, b]: [u8; 3]) -> u32 {
    (r as u32) << 16 | (g as u32) << 8 | b as u32
}

#[inline]
fn unpack(key: u32) -> [u8; 3] {
    [(key >> 16) as u8, (key >> 8) as u8, key as u8]
}

impl ColorHistogram {
    pub(crate) fn from_pixels<I>(pixels: I) -> Self
    where
        I: IntoIterator<Item = [u8; 3]>,
    {
        let mut keys: Vec<u32> = pixels.into_iter().map(pack).collect();
        keys.sort_unstable();

        let mut histogram = Self {
            total: keys.len() as u64,
            ..Self::default()
        };

        for chunk in keys.chunk_by(|a, b| a == b) {
            let bytes = unpack(chunk[0]);
            histogram.bytes.push(bytes);
            histogram.lab.push(to_perceptual(bytes));
            histogram.counts.push(chunk.len() as u64);
        }
        histogram
    }

    /// Keep only colors inside `window`, unless fewer than `min_pixels`
    /// pixels would remain, in which case the histogram is returned as is.
    pub(crate) fn retain_lightness(self, window: LightnessWindow, min_pixels: u64) -> Self {
        let kept: u64 = self
            .lab
            .iter()
            .zip(&self.counts)
            .filter(|(lab, _)| window.contains(lab.l))
            .map(|(_, &count)| count)
            .sum();
        if kept < min_pixels {
            return self;
        }

        let mut retained = Self {
            total: kept,
            ..Self::default()
        };
        for ((bytes, lab), count) in self.bytes.into_iter().zip(self.lab).zip(self.counts) {
            if window.contains(lab.l) {
                retained.bytes.push(bytes);
                retained.lab.push(lab);
                retained.counts.push(count);
            }
        }
        retained
    }

    pub(crate) fn len(&self) -> usize {
        self.bytes.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
