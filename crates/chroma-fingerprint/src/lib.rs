#![allow(clippy::excessive_precision, clippy::many_single_char_names)]

//! chroma-fingerprint: perceptual color fingerprints and palette matching
//!
//! This library reduces an image to a handful of weighted dominant colors in
//! CIE L\*a\*b\* and assigns it to the closest palette of a fixed reference
//! library using CIEDE2000.
//!
//! # Quick Start
//!
//! ```
//! use chroma_fingerprint::{
//!     match_clusters, ColorStatistics, DominantColorExtractor, ExtractOptions, PaletteLibrary,
//! };
//!
//! let library = PaletteLibrary::fallback();
//! let extractor = DominantColorExtractor::new(ExtractOptions::default()).unwrap();
//!
//! // three quarters navy, one quarter pale blue
//! let mut pixels = vec![[0x00, 0x38, 0x54]; 48];
//! pixels.extend(vec![[0x76, 0xA0, 0xB3]; 16]);
//!
//! let clusters = extractor.extract(pixels);
//! let stats = ColorStatistics::from_clusters(&clusters).unwrap();
//! let best = match_clusters(&clusters, &library).unwrap();
//!
//! assert_eq!(best.palette_id.as_str(), "009");
//! assert!(stats.mean_lightness < 50.0);
//! ```
//!
//! # Color Spaces
//!
//! | Type | Used for |
//! |------|----------|
//! | [`Srgb`] | image pixels, hex strings, output |
//! | [`LinearRgb`] | the bridge between gamma-encoded values and XYZ |
//! | [`Lab`] | clustering (squared Euclidean), statistics, matching (ΔE00) |
//!
//! The sRGB transfer curve is evaluated through lookup tables generated by
//! `build.rs`. Lab uses the D65 white point, and all Lab math is `f64`.
//!
//! # Determinism
//!
//! k-means seeding is farthest-point from the most frequent color, with all
//! ties broken by fixed orders (byte order of colors, cluster index, palette
//! id). The same pixels and the same library always give the same clusters,
//! the same palette and the same distance.

pub mod color;
pub mod extract;
pub mod matcher;
pub mod palette;


pub use color::{delta_e_2000, to_device, to_perceptual, Lab, LinearRgb, Srgb};
pub use extract::{
    ColorStatistics, DominantColorExtractor, ExtractError, ExtractOptions, LightnessWindow,
    WeightedCluster, BACKDROP_LIGHTNESS_WINDOW, DEFAULT_CLUSTERS, DEFAULT_MAX_ITERATIONS,
};
pub use matcher::{
    match_clusters, palette_distance, rank_palettes, MatchError, MatchStrength, PaletteMatch,
    TIE_TOLERANCE,
};
pub use palette::{PaletteError, PaletteId, PaletteLibrary, ParseColorError, ReferencePalette};
