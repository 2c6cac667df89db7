//! A single named reference palette with precomputed Lab colors.

use super::error::PaletteError;
use super::id::PaletteId;
use crate::color::{Lab, Srgb};

/// A named, ordered, non-empty set of reference colors.
///
/// Every color is stored both as [`Srgb`] (for hex output) and as [`Lab`]
/// (for distance computation). Conversions happen once at construction.
///
/// # Example
///
/// ```
/// use chroma_fingerprint::ReferencePalette;
///
/// let palette = ReferencePalette::from_hex("001", "Plum Mouse Gray", &["#917877", "#E9DFE0"])
///     .unwrap();
/// assert_eq!(palette.len(), 2);
/// assert_eq!(palette.hex_colors()[0], "#917877");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ReferencePalette {
    id: PaletteId,
    name: String,
    srgb: Vec<Srgb>,
    lab: Vec<Lab>,
}

impl ReferencePalette {
    /// Create a palette from sRGB colors.
    ///
    /// # Errors
    ///
    /// - [`PaletteError::EmptyId`] when `id` is blank
    /// - [`PaletteError::EmptyPalette`] when `colors` is empty
    pub fn new(
        id: impl Into<PaletteId>,
        name: impl Into<String>,
        colors: &[Srgb],
    ) -> Result<Self, PaletteError> {
        let id = id.into();
        if id.as_str().trim().is_empty() {
            return Err(PaletteError::EmptyId);
        }
        if colors.is_empty() {
            return Err(PaletteError::EmptyPalette { id: id.into_string() });
        }

        Ok(Self {
            id,
            name: name.into(),
            srgb: colors.to_vec(),
            lab: colors.iter().map(|&c| Lab::from(c)).collect(),
        })
    }

    /// Unchecked constructor for the embedded tables.
    pub(crate) fn from_parts(id: PaletteId, name: String, srgb: Vec<Srgb>, lab: Vec<Lab>) -> Self {
        debug_assert!(!srgb.is_empty() && srgb.len() == lab.len());
        Self { id, name, srgb, lab }
    }

    /// Create a palette from hex strings (`#RRGGBB`, `RRGGBB`, `#RGB`).
    pub fn from_hex<S: AsRef<str>>(
        id: impl Into<PaletteId>,
        name: impl Into<String>,
        hex: &[S],
    ) -> Result<Self, PaletteError> {
        let id = id.into();
        let mut colors = Vec::with_capacity(hex.len());
        for (index, h) in hex.iter().enumerate() {
            let color = h
                .as_ref()
                .parse::<Srgb>()
                .map_err(|source| PaletteError::ParseColor {
                    id: id.to_string(),
                    index,
                    source,
                })?;
            colors.push(color);
        }
        Self::new(id, name, &colors)
    }

    pub fn id(&self) -> &PaletteId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn colors(&self) -> &[Srgb] {
        &self.srgb
    }

    pub fn lab_colors(&self) -> &[Lab] {
        &self.lab
    }

    /// Colors formatted as uppercase `#RRGGBB`.
    pub fn hex_colors(&self) -> Vec<String> {
        self.srgb.iter().map(|c| c.to_hex()).collect()
    }

    /// Number of colors; never zero.
    pub fn len(&self) -> usize {
        self.srgb.len()
    }

    /// Always false; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.srgb.is_empty()
    }

    /// Smallest CIEDE2000 distance from `color` to any color of this palette.
    pub fn nearest_distance(&self, color: Lab) -> f64 {
        self.lab
            .iter()
            .map(|&p| color.delta_e(p))
            .fold(f64::INFINITY, f64::min)
    }
}
