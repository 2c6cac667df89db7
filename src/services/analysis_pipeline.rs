//! Batch analysis: decode, extract, match for every manifest entry.
//!
//! Images are processed on blocking worker threads, at most `workers` at a
//! time. Results arrive in completion order and are sorted by image id
//! before they are returned, so the outcome does not depend on scheduling.

use crate::error::AnalysisError;
use crate::models::{AppConfig, ImageEntry, ImageRecord};
use crate::services::image_decoder::decode_pixels;
use chroma_fingerprint::{
    match_clusters, ColorStatistics, DominantColorExtractor, ExtractOptions, PaletteLibrary,
};
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Image that produced no record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedImage {
    pub id: String,
    pub reason: String,
}

/// Everything a batch run produced
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Sorted by image id
    pub records: Vec<ImageRecord>,
    /// Sorted by image id
    pub skipped: Vec<SkippedImage>,
    /// Entries left after year filtering and sampling
    pub selected: usize,
    /// The run stopped early on a shutdown request
    pub interrupted: bool,
}

impl BatchOutcome {
    pub fn processed(&self) -> usize {
        self.records.len()
    }
}

/// Per-image analysis, shareable across worker threads
#[derive(Debug, Clone)]
pub struct ImageAnalyzer {
    extractor: DominantColorExtractor,
    library: Arc<PaletteLibrary>,
    resize: u32,
}

impl ImageAnalyzer {
    pub fn new(
        options: ExtractOptions,
        library: Arc<PaletteLibrary>,
        resize: u32,
    ) -> Result<Self, AnalysisError> {
        if library.is_empty() {
            return Err(AnalysisError::EmptyPaletteLibrary);
        }
        Ok(Self {
            extractor: DominantColorExtractor::new(options)?,
            library,
            resize,
        })
    }

    pub fn library(&self) -> &PaletteLibrary {
        &self.library
    }

    /// Analyse one image. Blocks; call from a worker thread.
    pub fn analyze(&self, entry: &ImageEntry) -> Result<ImageRecord, AnalysisError> {
        let pixels = decode_pixels(&entry.meta.id, &entry.source, self.resize)?;
        let clusters = self.extractor.extract(pixels);
        let statistics =
            ColorStatistics::from_clusters(&clusters).ok_or(AnalysisError::EmptyClusterSet)?;
        let matched = match_clusters(&clusters, &self.library)?;

        Ok(ImageRecord {
            meta: entry.meta.clone(),
            image_path: entry.source.path().map(|p| p.to_path_buf()),
            clusters,
            statistics,
            palette_id: matched.palette_id,
            palette_name: matched.palette_name,
            match_distance: matched.distance,
        })
    }
}

/// Batch runner over a manifest
pub struct AnalysisPipeline {
    config: Arc<AppConfig>,
    analyzer: ImageAnalyzer,
}

impl AnalysisPipeline {
    /// Validates the configuration before anything else happens.
    pub fn new(config: Arc<AppConfig>, library: Arc<PaletteLibrary>) -> Result<Self, AnalysisError> {
        config.validate()?;
        let analyzer = ImageAnalyzer::new(config.extract_options(), library, config.analysis.resize)?;
        Ok(Self { config, analyzer })
    }

    pub fn analyzer(&self) -> &ImageAnalyzer {
        &self.analyzer
    }

    /// Apply the year range, order by id and take the sample.
    ///
    /// The sample is every `len / n`-th entry of the id-sorted list, so the
    /// same manifest always yields the same subset.
    pub fn select(&self, mut entries: Vec<ImageEntry>) -> Vec<ImageEntry> {
        entries.retain(|e| self.config.year_in_range(e.meta.year));
        entries.sort_by(|a, b| a.meta.id.cmp(&b.meta.id));

        match self.config.analysis.sample {
            Some(n) if n < entries.len() => {
                let len = entries.len();
                let mut picked = Vec::with_capacity(n);
                let mut next = 0;
                for (i, entry) in entries.into_iter().enumerate() {
                    if next < n && i == next * len / n {
                        picked.push(entry);
                        next += 1;
                    }
                }
                picked
            }
            _ => entries,
        }
    }

    /// Run the whole batch.
    pub async fn run(&self, entries: Vec<ImageEntry>) -> Result<BatchOutcome, AnalysisError> {
        self.run_until(entries, std::future::pending()).await
    }

    /// Run the batch until it completes or `shutdown` resolves.
    ///
    /// After shutdown no new image is started; images already being
    /// processed finish and their records are kept.
    pub async fn run_until<F>(
        &self,
        entries: Vec<ImageEntry>,
        shutdown: F,
    ) -> Result<BatchOutcome, AnalysisError>
    where
        F: Future<Output = ()>,
    {
        let selected = self.select(entries);
        let workers = self.config.worker_count();
        tracing::info!(images = selected.len(), workers, "Starting analysis");

        let mut outcome = BatchOutcome {
            selected: selected.len(),
            ..Default::default()
        };
        let semaphore = Arc::new(Semaphore::new(workers));
        let mut tasks = JoinSet::new();
        tokio::pin!(shutdown);

        for entry in selected {
            let permit = tokio::select! {
                biased;
                _ = &mut shutdown => {
                    tracing::warn!("Shutdown requested, finishing in-flight images");
                    outcome.interrupted = true;
                    break;
                }
                permit = semaphore.clone().acquire_owned() => {
                    permit.map_err(|e| AnalysisError::Worker(e.to_string()))?
                }
            };

            let analyzer = self.analyzer.clone();
            tasks.spawn_blocking(move || {
                let _permit = permit;
                let result = analyzer.analyze(&entry);
                (entry.meta.id, result)
            });
        }

        while let Some(joined) = tasks.join_next().await {
            let (id, result) = joined.map_err(|e| AnalysisError::Worker(e.to_string()))?;
            match result {
                Ok(record) => {
                    tracing::debug!(
                        id = %id,
                        palette = %record.palette_id,
                        distance = record.match_distance,
                        "Analyzed image"
                    );
                    outcome.records.push(record);
                }
                Err(AnalysisError::DecodeFailure { id, reason }) => {
                    tracing::warn!(id = %id, reason = %reason, "Skipping image");
                    outcome.skipped.push(SkippedImage { id, reason });
                }
                Err(e) => {
                    tasks.abort_all();
                    return Err(e);
                }
            }
        }

        outcome.records.sort_by(|a, b| a.meta.id.cmp(&b.meta.id));
        outcome.skipped.sort_by(|a, b| a.id.cmp(&b.id));

        tracing::info!(
            processed = outcome.processed(),
            skipped = outcome.skipped.len(),
            interrupted = outcome.interrupted,
            "Analysis finished"
        );
        Ok(outcome)
    }
}
