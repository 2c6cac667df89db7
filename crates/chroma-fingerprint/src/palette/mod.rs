//! Reference palettes and the palette library
//!
//! Palettes are the classification targets: each image is assigned to the
//! library palette whose colors best cover its dominant colors.

mod error;
mod fallback;
mod id;
mod library;
mod reference;

pub use error::{PaletteError, ParseColorError};
pub use id::PaletteId;
pub use library::PaletteLibrary;
pub use reference::ReferencePalette;
