//! The reference palette library.
//!
//! An immutable, id-sorted collection of [`ReferencePalette`]s. Build it once
//! per run, wrap it in an `Arc` and share it read-only.

use super::error::PaletteError;
use super::fallback::fallback_palettes;
use super::reference::ReferencePalette;

/// Id-sorted collection of reference palettes with unique ids.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaletteLibrary {
    palettes: Vec<ReferencePalette>,
}

impl PaletteLibrary {
    /// Build a library. Palettes are sorted by id; when ids repeat, the
    /// palette that came first in `palettes` is kept.
    pub fn new(mut palettes: Vec<ReferencePalette>) -> Self {
        // stable sort keeps input order among equal ids
        palettes.sort_by(|a, b| a.id().cmp(b.id()));
        palettes.dedup_by(|later, earlier| later.id() == earlier.id());
        Self { palettes }
    }

    /// The embedded 30-palette Sanzo Wada subset.
    pub fn fallback() -> Self {
        Self::new(fallback_palettes())
    }

    /// Look up a palette by id.
    pub fn get(&self, id: &str) -> Result<&ReferencePalette, PaletteError> {
        self.palettes
            .iter()
            .find(|p| p.id().as_str() == id)
            .ok_or_else(|| PaletteError::UnknownPaletteId(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_ok()
    }

    /// Palettes in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &ReferencePalette> {
        self.palettes.iter()
    }

    pub fn palettes(&self) -> &[ReferencePalette] {
        &self.palettes
    }

    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }

    /// Total number of colors over all palettes.
    pub fn color_count(&self) -> usize {
        self.palettes.iter().map(ReferencePalette::len).sum()
    }
}

impl<'a> IntoIterator for &'a PaletteLibrary {
    type Item = &'a ReferencePalette;
    type IntoIter = std::slice::Iter<'a, ReferencePalette>;

    fn into_iter(self) -> Self::IntoIter {
        self.palettes.iter()
    }
}
