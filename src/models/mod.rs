pub mod aggregate;
pub mod config;
pub mod record;

pub use aggregate::{AggregateRecord, GroupDistance, PaletteCount};
pub use config::{AnalysisConfig, AppConfig, PaletteSourceConfig, DEFAULT_CATALOG_URL};
pub use record::{
    decade_of, load_manifest, parse_manifest, Category, ImageEntry, ImageMeta, ImageRecord,
    ImageRow, ImageSource, Season,
};
