use chroma_fingerprint::{ExtractError, MatchError, PaletteError};
use thiserror::Error;

/// Errors of the analysis run.
///
/// `DecodeFailure` is per image and never stops a batch. `PaletteSourceUnavailable`
/// is recovered by the embedded fallback. Everything else is fatal.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Failed to decode image {id}: {reason}")]
    DecodeFailure { id: String, reason: String },

    #[error("Palette source unavailable: {0}")]
    PaletteSourceUnavailable(#[from] SourceError),

    #[error("Unknown palette id: {0}")]
    UnknownPaletteId(String),

    #[error("Cannot match an empty cluster set")]
    EmptyClusterSet,

    #[error("Palette library is empty")]
    EmptyPaletteLibrary,

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("Worker task failed: {0}")]
    Worker(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<MatchError> for AnalysisError {
    fn from(e: MatchError) -> Self {
        match e {
            MatchError::EmptyClusterSet => AnalysisError::EmptyClusterSet,
            MatchError::EmptyPaletteLibrary => AnalysisError::EmptyPaletteLibrary,
        }
    }
}

impl From<PaletteError> for AnalysisError {
    fn from(e: PaletteError) -> Self {
        match e {
            PaletteError::UnknownPaletteId(id) => AnalysisError::UnknownPaletteId(id),
            other => AnalysisError::Manifest(other.to_string()),
        }
    }
}

impl From<ExtractError> for AnalysisError {
    fn from(e: ExtractError) -> Self {
        AnalysisError::Configuration(ConfigError::Extract(e))
    }
}

/// Invalid configuration, detected before any image is processed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be at least {min}, got {value}")]
    TooSmall {
        field: &'static str,
        min: u64,
        value: u64,
    },

    #[error("{field} must be at most {max}, got {value}")]
    TooLarge {
        field: &'static str,
        max: u64,
        value: u64,
    },

    #[error("Year range is inverted: min_year {min} > max_year {max}")]
    InvertedYearRange { min: i32, max: i32 },

    #[error("Invalid palette source URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid extraction options: {0}")]
    Extract(ExtractError),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Failure to load the remote palette catalog.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {0}")]
    Status(u16),

    #[error("Invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Catalog contains no usable palettes")]
    Empty,

    #[error("Palette source disabled (offline)")]
    Offline,
}
