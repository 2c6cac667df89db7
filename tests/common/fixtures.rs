//! Test fixtures: images on disk and hand-built records.

use chroma_fingerprint::{ColorStatistics, PaletteId};
use image::{Rgb, RgbImage};
use runway_chroma::models::{Category, ImageEntry, ImageMeta, ImageRecord, Season};
use std::path::{Path, PathBuf};

/// Metadata with fixed category
pub fn meta(id: &str, year: i32, designer: &str, season: Season) -> ImageMeta {
    ImageMeta {
        id: id.to_string(),
        year,
        designer: designer.to_string(),
        season,
        category: Category::ReadyToWear,
    }
}

/// Write a single-color PNG and return its path
pub fn solid_png(dir: &Path, name: &str, color: [u8; 3]) -> PathBuf {
    let path = dir.join(name);
    RgbImage::from_pixel(32, 32, Rgb(color))
        .save(&path)
        .unwrap();
    path
}

/// Write a PNG whose left half is `left` and right half `right`
pub fn split_png(dir: &Path, name: &str, left: [u8; 3], right: [u8; 3]) -> PathBuf {
    let path = dir.join(name);
    RgbImage::from_fn(32, 32, |x, _| if x < 16 { Rgb(left) } else { Rgb(right) })
        .save(&path)
        .unwrap();
    path
}

/// Write a PNG with a `subject` square centered on a `backdrop`
pub fn framed_png(dir: &Path, name: &str, backdrop: [u8; 3], subject: [u8; 3]) -> PathBuf {
    let path = dir.join(name);
    RgbImage::from_fn(32, 32, |x, y| {
        if (8..24).contains(&x) && (8..24).contains(&y) {
            Rgb(subject)
        } else {
            Rgb(backdrop)
        }
    })
    .save(&path)
    .unwrap();
    path
}

/// Write bytes that are not an image under an image file name
pub fn corrupt_file(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, b"\x89PNG\r\n\x1a\nthis is not really a png").unwrap();
    path
}

/// Entry for an image file on disk
pub fn entry(path: PathBuf, id: &str, year: i32) -> ImageEntry {
    ImageEntry::from_path(meta(id, year, "Test House", Season::Spring), path)
}

/// Parameters of a hand-built record
pub struct RecordSpec<'a> {
    pub id: &'a str,
    pub year: i32,
    pub designer: &'a str,
    pub season: Season,
    pub lab: (f64, f64, f64),
    pub chroma: f64,
    pub diversity: f64,
    pub palette: &'a str,
    pub distance: f64,
}

/// Record with explicit statistics, bypassing image analysis
pub fn record(spec: RecordSpec<'_>) -> ImageRecord {
    ImageRecord {
        meta: meta(spec.id, spec.year, spec.designer, spec.season),
        image_path: None,
        clusters: Vec::new(),
        statistics: ColorStatistics {
            mean_lightness: spec.lab.0,
            mean_a: spec.lab.1,
            mean_b: spec.lab.2,
            mean_chroma: spec.chroma,
            diversity: spec.diversity,
        },
        palette_id: PaletteId::new(spec.palette),
        palette_name: format!("Palette {}", spec.palette),
        match_distance: spec.distance,
    }
}
