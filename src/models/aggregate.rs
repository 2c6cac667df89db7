use chroma_fingerprint::{Lab, PaletteId};
use serde::Serialize;

/// How often one palette was assigned within a group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaletteCount {
    #[serde(serialize_with = "serialize_id")]
    pub palette_id: PaletteId,
    pub palette_name: String,
    pub count: usize,
    /// Percentage of the group's images, 0..=100
    pub share: f64,
}

fn serialize_id<S: serde::Serializer>(id: &PaletteId, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(id.as_str())
}

/// Summary statistics over all records sharing a key
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateRecord<K> {
    pub key: K,
    pub image_count: usize,
    pub mean_lightness: f64,
    pub mean_chroma: f64,
    pub mean_diversity: f64,
    pub mean_match_distance: f64,
    /// Equal-weight mean of the members' mean Lab colors
    pub centroid: Lab,
    /// Sorted by count descending, then palette id ascending
    pub palette_frequency: Vec<PaletteCount>,
}

impl<K> AggregateRecord<K> {
    /// Most frequent palette of the group.
    pub fn dominant_palette(&self) -> Option<&PaletteCount> {
        self.palette_frequency.first()
    }
}

/// Distance between two groups, e.g. consecutive decades
#[derive(Debug, Clone, PartialEq)]
pub struct GroupDistance<K> {
    pub source: K,
    pub target: K,
    /// ΔE00 between the two group centroids
    pub centroid_distance: f64,
    pub source_mean_match_distance: f64,
    pub target_mean_match_distance: f64,
}
