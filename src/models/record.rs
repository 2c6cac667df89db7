use crate::error::AnalysisError;
use chroma_fingerprint::{ColorStatistics, PaletteId, WeightedCluster};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Collection season
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Season {
    Spring,
    Fall,
    Resort,
    #[serde(rename = "Pre-Fall")]
    PreFall,
    /// Anything the manifest carries that is not one of the above
    #[serde(other)]
    Other,
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Season::Spring => "Spring",
            Season::Fall => "Fall",
            Season::Resort => "Resort",
            Season::PreFall => "Pre-Fall",
            Season::Other => "Other",
        };
        f.write_str(s)
    }
}

/// Collection category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Ready-to-Wear")]
    ReadyToWear,
    Menswear,
    Couture,
    Bridal,
    #[serde(other)]
    Other,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::ReadyToWear => "Ready-to-Wear",
            Category::Menswear => "Menswear",
            Category::Couture => "Couture",
            Category::Bridal => "Bridal",
            Category::Other => "Other",
        };
        f.write_str(s)
    }
}

/// Metadata shared by manifest entries and analysis records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMeta {
    pub id: String,
    pub year: i32,
    pub designer: String,
    pub season: Season,
    pub category: Category,
}

impl ImageMeta {
    /// Decade the image belongs to, e.g. 1994 -> 1990
    pub fn decade(&self) -> i32 {
        decade_of(self.year)
    }
}

/// `floor(year / 10) * 10`
pub fn decade_of(year: i32) -> i32 {
    year.div_euclid(10) * 10
}

/// Where the image bytes come from
#[derive(Debug, Clone)]
pub enum ImageSource {
    Path(PathBuf),
    Bytes(Arc<[u8]>),
}

impl ImageSource {
    pub fn path(&self) -> Option<&Path> {
        match self {
            ImageSource::Path(p) => Some(p),
            ImageSource::Bytes(_) => None,
        }
    }
}

/// One image scheduled for analysis
#[derive(Debug, Clone)]
pub struct ImageEntry {
    pub meta: ImageMeta,
    pub source: ImageSource,
}

impl ImageEntry {
    pub fn from_path(meta: ImageMeta, path: impl Into<PathBuf>) -> Self {
        Self {
            meta,
            source: ImageSource::Path(path.into()),
        }
    }

    pub fn from_bytes(meta: ImageMeta, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            meta,
            source: ImageSource::Bytes(bytes.into()),
        }
    }
}

/// Manifest line as stored on disk
#[derive(Debug, Clone, Deserialize)]
struct ManifestEntry {
    #[serde(flatten)]
    meta: ImageMeta,
    image_path: PathBuf,
}

/// Parse a JSON manifest. Relative image paths resolve against `base_dir`.
pub fn parse_manifest(content: &str, base_dir: &Path) -> Result<Vec<ImageEntry>, AnalysisError> {
    let entries: Vec<ManifestEntry> =
        serde_json::from_str(content).map_err(|e| AnalysisError::Manifest(e.to_string()))?;

    Ok(entries
        .into_iter()
        .map(|entry| {
            let path = if entry.image_path.is_absolute() {
                entry.image_path
            } else {
                base_dir.join(entry.image_path)
            };
            ImageEntry::from_path(entry.meta, path)
        })
        .collect())
}

/// Read and parse a manifest file.
pub fn load_manifest(path: &Path) -> Result<Vec<ImageEntry>, AnalysisError> {
    let content = std::fs::read_to_string(path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let entries = parse_manifest(&content, base_dir)?;
    tracing::info!(path = %path.display(), entries = entries.len(), "Loaded manifest");
    Ok(entries)
}

/// Result of analysing one image. A record exists only for images that
/// decoded and matched; it is never partially filled.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRecord {
    pub meta: ImageMeta,
    pub image_path: Option<PathBuf>,
    pub clusters: Vec<WeightedCluster>,
    pub statistics: ColorStatistics,
    pub palette_id: PaletteId,
    pub palette_name: String,
    pub match_distance: f64,
}

/// Flat output row for `image_records.json`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageRow {
    pub id: String,
    pub year: i32,
    pub designer: String,
    pub season: Season,
    pub category: Category,
    pub mean_lightness: f64,
    pub mean_chroma: f64,
    pub diversity: f64,
    pub palette_id: String,
    pub palette_name: String,
    pub match_distance: f64,
}

impl From<&ImageRecord> for ImageRow {
    fn from(record: &ImageRecord) -> Self {
        Self {
            id: record.meta.id.clone(),
            year: record.meta.year,
            designer: record.meta.designer.clone(),
            season: record.meta.season,
            category: record.meta.category,
            mean_lightness: record.statistics.mean_lightness,
            mean_chroma: record.statistics.mean_chroma,
            diversity: record.statistics.diversity,
            palette_id: record.palette_id.to_string(),
            palette_name: record.palette_name.clone(),
            match_distance: record.match_distance,
        }
    }
}
