//! Palette identifiers
//!
//! Catalog ids are usually zero-padded numbers ("001" .. "348") but some
//! catalogs key palettes by name. Two all-digit ids compare numerically, two
//! other ids compare lexicographically, and every all-digit id sorts before
//! every other id. Comparing mixed pairs lexicographically instead would not
//! be transitive ("2" < "10" < "1a" < "2").

use std::cmp::Ordering;
use std::fmt;

/// Identifier of a reference palette.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PaletteId(String);

impl PaletteId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    fn is_numeric(&self) -> bool {
        !self.0.is_empty() && self.0.bytes().all(|b| b.is_ascii_digit())
    }
}

/// Compare two all-digit strings by numeric value without parsing, so ids of
/// any length work.
fn cmp_numeric(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

impl Ord for PaletteId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_numeric(), other.is_numeric()) {
            // "01" and "1" are numerically equal but distinct ids
            (true, true) => cmp_numeric(&self.0, &other.0).then_with(|| self.0.cmp(&other.0)),
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for PaletteId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for PaletteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PaletteId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PaletteId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
