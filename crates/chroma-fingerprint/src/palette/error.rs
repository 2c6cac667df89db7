//! Error types for palette operations
//!
//! Color parsing, palette validation and library lookup.

use std::fmt;
use std::num::ParseIntError;

/// Error type for parsing hex color strings.
///
/// Returned when parsing a hex color string fails, either due to
/// invalid length or invalid hexadecimal characters.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseColorError {
    /// Hex string has invalid length (must be 3 or 6 characters after stripping '#')
    InvalidLength,
    /// Invalid hexadecimal character encountered
    InvalidHex(ParseIntError),
}

impl From<ParseIntError> for ParseColorError {
    fn from(err: ParseIntError) -> Self {
        ParseColorError::InvalidHex(err)
    }
}

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseColorError::InvalidLength => {
                write!(f, "invalid hex color length (expected 3 or 6 characters)")
            }
            ParseColorError::InvalidHex(err) => {
                write!(f, "invalid hex character: {}", err)
            }
        }
    }
}

impl std::error::Error for ParseColorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseColorError::InvalidHex(err) => Some(err),
            _ => None,
        }
    }
}

/// Error type for reference palettes and the palette library.
#[derive(Debug, Clone, PartialEq)]
pub enum PaletteError {
    /// Palette id is empty or only whitespace
    EmptyId,
    /// Palette has no colors
    EmptyPalette {
        /// Id of the offending palette
        id: String,
    },
    /// Invalid hex color string in a palette definition
    ParseColor {
        /// Id of the offending palette
        id: String,
        /// Position of the color within the palette
        index: usize,
        /// Underlying parse failure
        source: ParseColorError,
    },
    /// Lookup of an id the library does not contain
    UnknownPaletteId(String),
}

impl fmt::Display for PaletteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaletteError::EmptyId => write!(f, "palette id cannot be empty"),
            PaletteError::EmptyPalette { id } => {
                write!(f, "palette '{}' has no colors", id)
            }
            PaletteError::ParseColor { id, index, source } => {
                write!(f, "palette '{}' color {}: {}", id, index, source)
            }
            PaletteError::UnknownPaletteId(id) => {
                write!(f, "unknown palette id '{}'", id)
            }
        }
    }
}

impl std::error::Error for PaletteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PaletteError::ParseColor { source, .. } => Some(source),
            _ => None,
        }
    }
}
