//! Runway Chroma - chromatic fingerprinting of runway photographs
//!
//! Decodes runway images, extracts their dominant colors, assigns each image
//! to the closest Sanzo Wada palette and aggregates the assignments by year,
//! decade, designer and season. Color math lives in the `chroma-fingerprint`
//! crate; this crate holds the batch pipeline and its I/O.
//! This library exposes modules for integration testing.

pub mod assets;
pub mod error;
pub mod models;
pub mod services;
