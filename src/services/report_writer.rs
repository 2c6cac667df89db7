//! Output tables of an analysis run, written as pretty JSON files.

use crate::error::AnalysisError;
use crate::models::{AggregateRecord, AppConfig, GroupDistance, ImageRow, PaletteCount};
use crate::services::analysis_pipeline::{BatchOutcome, SkippedImage};
use crate::services::palette_source::LoadedLibrary;
use crate::services::temporal::{
    aggregate_by, by_decade, by_season, by_year, consecutive_distances, designer_table,
    top_palettes,
};
use serde::Serialize;
use std::fmt::Display;
use std::fs;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

/// Palettes listed in `top_palettes.json`
pub const DEFAULT_TOP_PALETTES: usize = 15;

/// One group of `yearly.json`, `decades.json`, `designers.json`, `seasons.json`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateRow {
    pub group: String,
    pub image_count: usize,
    pub mean_lightness: f64,
    pub mean_chroma: f64,
    pub mean_diversity: f64,
    pub mean_match_distance: f64,
    pub centroid_l: f64,
    pub centroid_a: f64,
    pub centroid_b: f64,
    pub dominant_palette_id: Option<String>,
    pub palette_frequency: Vec<PaletteCount>,
}

impl<K: Display> From<&AggregateRecord<K>> for AggregateRow {
    fn from(g: &AggregateRecord<K>) -> Self {
        Self {
            group: g.key.to_string(),
            image_count: g.image_count,
            mean_lightness: g.mean_lightness,
            mean_chroma: g.mean_chroma,
            mean_diversity: g.mean_diversity,
            mean_match_distance: g.mean_match_distance,
            centroid_l: g.centroid.l,
            centroid_a: g.centroid.a,
            centroid_b: g.centroid.b,
            dominant_palette_id: g.dominant_palette().map(|p| p.palette_id.to_string()),
            palette_frequency: g.palette_frequency.clone(),
        }
    }
}

/// One line of `decade_distances.json`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistanceRow {
    pub source: String,
    pub target: String,
    pub centroid_distance: f64,
    pub source_mean_match_distance: f64,
    pub target_mean_match_distance: f64,
}

impl<K: Display> From<&GroupDistance<K>> for DistanceRow {
    fn from(d: &GroupDistance<K>) -> Self {
        Self {
            source: d.source.to_string(),
            target: d.target.to_string(),
            centroid_distance: d.centroid_distance,
            source_mean_match_distance: d.source_mean_match_distance,
            target_mean_match_distance: d.target_mean_match_distance,
        }
    }
}

/// Most frequent palette of one decade, with its colors
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecadePaletteRow {
    pub decade: i32,
    pub palette_id: String,
    pub palette_name: String,
    pub count: usize,
    pub share: f64,
    pub image_count: usize,
    pub colors: Vec<String>,
}

/// Run tally for `summary.json`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub selected: usize,
    pub processed: usize,
    pub skipped: usize,
    pub interrupted: bool,
    pub palette_source: String,
    pub palette_count: usize,
    pub skipped_images: Vec<SkippedImage>,
}

/// All output tables of one run
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    pub images: Vec<ImageRow>,
    pub yearly: Vec<AggregateRow>,
    pub decades: Vec<AggregateRow>,
    pub designers: Vec<AggregateRow>,
    pub seasons: Vec<AggregateRow>,
    pub decade_distances: Vec<DistanceRow>,
    pub decade_palettes: Vec<DecadePaletteRow>,
    pub top_palettes: Vec<PaletteCount>,
    pub summary: RunSummary,
}

impl AnalysisReport {
    /// Aggregate a batch outcome into the output tables.
    pub fn build(
        outcome: &BatchOutcome,
        loaded: &LoadedLibrary,
        config: &AppConfig,
        top_n: usize,
    ) -> Result<Self, AnalysisError> {
        let records = &outcome.records;
        let decades = aggregate_by(records, by_decade);

        let mut decade_palettes = Vec::new();
        for group in decades.values() {
            let Some(dominant) = group.dominant_palette() else {
                continue;
            };
            let palette = loaded.library.get(dominant.palette_id.as_str())?;
            decade_palettes.push(DecadePaletteRow {
                decade: group.key,
                palette_id: dominant.palette_id.to_string(),
                palette_name: dominant.palette_name.clone(),
                count: dominant.count,
                share: dominant.share,
                image_count: group.image_count,
                colors: palette.hex_colors(),
            });
        }

        Ok(Self {
            images: records.iter().map(ImageRow::from).collect(),
            yearly: rows(aggregate_by(records, by_year).values()),
            decades: rows(decades.values()),
            designers: rows(designer_table(records, config.designer_min_images).iter()),
            seasons: rows(aggregate_by(records, by_season).values()),
            decade_distances: consecutive_distances(&decades).iter().map(DistanceRow::from).collect(),
            decade_palettes,
            top_palettes: top_palettes(records, top_n),
            summary: RunSummary {
                selected: outcome.selected,
                processed: outcome.processed(),
                skipped: outcome.skipped.len(),
                interrupted: outcome.interrupted,
                palette_source: loaded.origin.to_string(),
                palette_count: loaded.library.len(),
                skipped_images: outcome.skipped.clone(),
            },
        })
    }

    /// Write every table into `dir`, creating it if needed.
    pub fn write_to(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        fs::create_dir_all(dir)?;
        let written = vec![
            write_json(dir, "image_records.json", &self.images)?,
            write_json(dir, "yearly.json", &self.yearly)?,
            write_json(dir, "decades.json", &self.decades)?,
            write_json(dir, "designers.json", &self.designers)?,
            write_json(dir, "seasons.json", &self.seasons)?,
            write_json(dir, "decade_distances.json", &self.decade_distances)?,
            write_json(dir, "decade_palettes.json", &self.decade_palettes)?,
            write_json(dir, "top_palettes.json", &self.top_palettes)?,
            write_json(dir, "summary.json", &self.summary)?,
        ];
        tracing::info!(dir = %dir.display(), files = written.len(), "Wrote report");
        Ok(written)
    }
}

fn rows<'a, K, I>(groups: I) -> Vec<AggregateRow>
where
    K: Display + 'a,
    I: Iterator<Item = &'a AggregateRecord<K>>,
{
    groups.map(AggregateRow::from).collect()
}

fn write_json<T: Serialize + ?Sized>(dir: &Path, name: &str, value: &T) -> io::Result<PathBuf> {
    let path = dir.join(name);
    let file = fs::File::create(&path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), value).map_err(io::Error::from)?;
    tracing::debug!(path = %path.display(), "Wrote table");
    Ok(path)
}
