//! Dominant color extraction
//!
//! Reduces an image's pixels to a small weighted set of Lab colors. The
//! pipeline is:
//!
//! ```text
//! pixels ([u8; 3]) -> distinct-color histogram -> lightness window
//!        -> maximin seeds -> Lloyd iterations -> weighted clusters (sorted)
//! ```
//!
//! The optional lightness window drops near-black and near-white pixels
//! (studio backdrops) before clustering. When fewer than `k` pixels survive
//! the window, every pixel is clustered instead.
//!
//! Decoding and resizing happen before this module; it only sees pixels.

mod histogram;
mod kmeans;
mod stats;

use std::cmp::Ordering;
use std::fmt;

use crate::color::Lab;
use histogram::ColorHistogram;

pub use stats::ColorStatistics;

/// Default number of clusters.
pub const DEFAULT_CLUSTERS: usize = 6;
/// Default Lloyd iteration cap.
pub const DEFAULT_MAX_ITERATIONS: usize = 50;

/// Backdrop window: 8-bit lightness strictly between 10 and 245, in L\* units.
pub const BACKDROP_LIGHTNESS_WINDOW: LightnessWindow = LightnessWindow {
    min: 10.0 * 100.0 / 255.0,
    max: 245.0 * 100.0 / 255.0,
};

/// Open interval of L\* values a pixel must fall in to be clustered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightnessWindow {
    pub min: f64,
    pub max: f64,
}

impl LightnessWindow {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, l: f64) -> bool {
        l > self.min && l < self.max
    }

    fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min < self.max
    }
}

/// One dominant color of an image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedCluster {
    /// Count-weighted mean of the member pixels
    pub centroid: Lab,
    /// Fraction of the image's pixels in this cluster, in `(0, 1]`
    pub weight: f64,
    /// Number of member pixels
    pub pixel_count: u64,
}

/// Error for invalid extraction options.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractError {
    /// `clusters` must be at least 1
    ZeroClusters,
    /// `max_iterations` must be at least 1
    ZeroIterations,
    /// The lightness window is empty or not finite
    InvalidLightnessWindow { min: f64, max: f64 },
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractError::ZeroClusters => write!(f, "cluster count must be at least 1"),
            ExtractError::ZeroIterations => write!(f, "iteration cap must be at least 1"),
            ExtractError::InvalidLightnessWindow { min, max } => {
                write!(f, "lightness window ({min}, {max}) is empty")
            }
        }
    }
}

impl std::error::Error for ExtractError {}

/// Options for [`DominantColorExtractor`].
///
/// ```
/// use chroma_fingerprint::ExtractOptions;
///
/// let options = ExtractOptions::new().clusters(8).max_iterations(100);
/// assert_eq!(options.clusters, 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtractOptions {
    /// Number of clusters `k`.
    pub clusters: usize,
    /// Upper bound on Lloyd iterations.
    pub max_iterations: usize,
    /// Pixels outside this window are ignored; `None` keeps every pixel.
    pub lightness: Option<LightnessWindow>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            clusters: DEFAULT_CLUSTERS,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            lightness: None,
        }
    }
}

impl ExtractOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn clusters(mut self, k: usize) -> Self {
        self.clusters = k;
        self
    }

    #[inline]
    pub fn max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    #[inline]
    pub fn lightness(mut self, window: Option<LightnessWindow>) -> Self {
        self.lightness = window;
        self
    }
}

/// Deterministic k-means extractor.
///
/// Construction validates the options; [`extract()`](Self::extract) takes
/// `&self` so one extractor serves every image of a batch.
///
/// ```
/// use chroma_fingerprint::{DominantColorExtractor, ExtractOptions};
///
/// let extractor = DominantColorExtractor::new(ExtractOptions::new().clusters(2)).unwrap();
/// let mut pixels = vec![[255, 0, 0]; 75];
/// pixels.extend(vec![[0, 0, 255]; 25]);
///
/// let clusters = extractor.extract(pixels);
/// assert_eq!(clusters.len(), 2);
/// assert_eq!(clusters[0].weight, 0.75);
/// ```
#[derive(Debug, Clone)]
pub struct DominantColorExtractor {
    options: ExtractOptions,
}

impl DominantColorExtractor {
    pub fn new(options: ExtractOptions) -> Result<Self, ExtractError> {
        if options.clusters == 0 {
            return Err(ExtractError::ZeroClusters);
        }
        if options.max_iterations == 0 {
            return Err(ExtractError::ZeroIterations);
        }
        if let Some(w) = options.lightness.filter(|w| !w.is_valid()) {
            return Err(ExtractError::InvalidLightnessWindow {
                min: w.min,
                max: w.max,
            });
        }
        Ok(Self { options })
    }

    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Extract up to `k` dominant colors.
    ///
    /// Clusters come back sorted by descending weight, ties by ascending
    /// L, a, b. Weights sum to 1 over the clustered pixels. An empty pixel
    /// set gives no clusters.
    pub fn extract<I>(&self, pixels: I) -> Vec<WeightedCluster>
    where
        I: IntoIterator<Item = [u8; 3]>,
    {
        let mut histogram = ColorHistogram::from_pixels(pixels);
        if let Some(window) = self.options.lightness {
            histogram = histogram.retain_lightness(window, self.options.clusters as u64);
        }
        if histogram.total == 0 {
            return Vec::new();
        }

        let total = histogram.total as f64;
        let mut clusters: Vec<WeightedCluster> =
            kmeans::kmeans(&histogram, self.options.clusters, self.options.max_iterations)
                .into_iter()
                .map(|raw| WeightedCluster {
                    centroid: raw.centroid,
                    weight: raw.count as f64 / total,
                    pixel_count: raw.count,
                })
                .collect();

        clusters.sort_by(cluster_order);
        clusters
    }
}

fn cluster_order(x: &WeightedCluster, y: &WeightedCluster) -> Ordering {
    y.pixel_count
        .cmp(&x.pixel_count)
        .then_with(|| x.centroid.l.total_cmp(&y.centroid.l))
        .then_with(|| x.centroid.a.total_cmp(&y.centroid.a))
        .then_with(|| x.centroid.b.total_cmp(&y.centroid.b))
}
