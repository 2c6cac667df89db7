use crate::assets::AssetLoader;
use crate::error::ConfigError;
use chroma_fingerprint::{
    DominantColorExtractor, ExtractOptions, LightnessWindow, BACKDROP_LIGHTNESS_WINDOW,
    DEFAULT_CLUSTERS, DEFAULT_MAX_ITERATIONS,
};
use serde::Deserialize;
use std::collections::HashMap;

/// Largest worker count the batch semaphore can hold.
pub const MAX_WORKERS: usize = tokio::sync::Semaphore::MAX_PERMITS;

/// Default palette catalog location.
pub const DEFAULT_CATALOG_URL: &str =
    "https://raw.githubusercontent.com/dblodorn/sanzo-wada/master/data.json";

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Extraction and batch settings
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Where the palette catalog comes from
    #[serde(default)]
    pub palette_source: PaletteSourceConfig,

    /// Minimum image count for a designer to appear in the designer table
    #[serde(default = "default_designer_min_images")]
    pub designer_min_images: usize,

    /// Display-name translations for catalog palette names
    #[serde(default)]
    pub palette_names: HashMap<String, String>,
}

fn default_designer_min_images() -> usize {
    50
}

/// Per-image analysis and batch settings
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Dominant colors per image
    #[serde(default = "default_clusters")]
    pub clusters: usize,

    /// Square edge length images are resized to before clustering
    #[serde(default = "default_resize")]
    pub resize: u32,

    /// Lloyd iteration cap
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    /// Optional cap on the number of analyzed images
    #[serde(default)]
    pub sample: Option<usize>,

    /// Inclusive lower year bound
    #[serde(default)]
    pub min_year: Option<i32>,

    /// Inclusive upper year bound
    #[serde(default)]
    pub max_year: Option<i32>,

    /// Worker count; `None` means available CPU cores
    #[serde(default)]
    pub workers: Option<usize>,

    /// Exclusive L* range of clustered pixels; `null` clusters every pixel
    #[serde(default = "default_lightness_window")]
    pub lightness_window: Option<LightnessRange>,
}

/// Lightness bounds as written in config.yaml
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct LightnessRange {
    pub min: f64,
    pub max: f64,
}

impl From<LightnessRange> for LightnessWindow {
    fn from(range: LightnessRange) -> Self {
        LightnessWindow::new(range.min, range.max)
    }
}

fn default_lightness_window() -> Option<LightnessRange> {
    Some(LightnessRange {
        min: BACKDROP_LIGHTNESS_WINDOW.min,
        max: BACKDROP_LIGHTNESS_WINDOW.max,
    })
}

fn default_clusters() -> usize {
    DEFAULT_CLUSTERS
}

fn default_resize() -> u32 {
    256
}

fn default_max_iterations() -> usize {
    DEFAULT_MAX_ITERATIONS
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            clusters: default_clusters(),
            resize: default_resize(),
            max_iterations: default_max_iterations(),
            sample: None,
            min_year: None,
            max_year: None,
            workers: None,
            lightness_window: default_lightness_window(),
        }
    }
}

/// Remote palette catalog settings
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PaletteSourceConfig {
    #[serde(default = "default_url")]
    pub url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Skip the network and use the embedded palettes
    #[serde(default)]
    pub offline: bool,
}

fn default_url() -> String {
    DEFAULT_CATALOG_URL.to_string()
}

fn default_timeout() -> u64 {
    10
}

impl Default for PaletteSourceConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_secs: default_timeout(),
            offline: false,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            analysis: AnalysisConfig::default(),
            palette_source: PaletteSourceConfig::default(),
            designer_min_images: default_designer_min_images(),
            palette_names: HashMap::new(),
        }
    }
}

fn at_least(field: &'static str, min: u64, value: u64) -> Result<(), ConfigError> {
    if value < min {
        return Err(ConfigError::TooSmall { field, min, value });
    }
    Ok(())
}

impl AppConfig {
    /// Parse a YAML document.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load configuration from AssetLoader (embedded or external)
    pub fn load_from_assets(loader: &AssetLoader) -> Self {
        match loader.read_config_string() {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::info!(
                        clusters = config.analysis.clusters,
                        resize = config.analysis.resize,
                        palette_names = config.palette_names.len(),
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Check every setting before any image is touched.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let a = &self.analysis;
        at_least("clusters", 1, a.clusters as u64)?;
        at_least("resize", 1, a.resize as u64)?;
        at_least("max_iterations", 1, a.max_iterations as u64)?;
        if let Some(workers) = a.workers {
            at_least("workers", 1, workers as u64)?;
            if workers > MAX_WORKERS {
                return Err(ConfigError::TooLarge {
                    field: "workers",
                    max: MAX_WORKERS as u64,
                    value: workers as u64,
                });
            }
        }
        if let Some(sample) = a.sample {
            at_least("sample", 1, sample as u64)?;
        }
        if let (Some(min), Some(max)) = (a.min_year, a.max_year) {
            if min > max {
                return Err(ConfigError::InvertedYearRange { min, max });
            }
        }
        DominantColorExtractor::new(self.extract_options()).map_err(ConfigError::Extract)?;

        let source = &self.palette_source;
        if !source.offline {
            at_least("timeout_secs", 1, source.timeout_secs)?;
            if !(source.url.starts_with("http://") || source.url.starts_with("https://")) {
                return Err(ConfigError::InvalidUrl(source.url.clone()));
            }
        }
        Ok(())
    }

    /// Options for the dominant color extractor.
    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions::new()
            .clusters(self.analysis.clusters)
            .max_iterations(self.analysis.max_iterations)
            .lightness(self.analysis.lightness_window.map(LightnessWindow::from))
    }

    /// Effective worker count.
    pub fn worker_count(&self) -> usize {
        self.analysis
            .workers
            .unwrap_or_else(|| {
                std::thread::available_parallelism()
                    .map(|n| n.get())
                    .unwrap_or(1)
            })
            .min(MAX_WORKERS)
    }

    /// Whether `year` lies in the configured inclusive range.
    pub fn year_in_range(&self, year: i32) -> bool {
        self.analysis.min_year.map_or(true, |min| year >= min)
            && self.analysis.max_year.map_or(true, |max| year <= max)
    }
}
