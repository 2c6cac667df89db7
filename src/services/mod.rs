pub mod analysis_pipeline;
pub mod image_decoder;
pub mod palette_source;
pub mod report_writer;
pub mod temporal;

pub use analysis_pipeline::{AnalysisPipeline, BatchOutcome, ImageAnalyzer, SkippedImage};
pub use image_decoder::decode_pixels;
pub use palette_source::{
    load_from_config, load_library, parse_catalog, source_from_config, HttpCatalogSource,
    LibraryOrigin, LoadedLibrary, OfflineSource, PaletteSource,
};
pub use report_writer::{AnalysisReport, DEFAULT_TOP_PALETTES};
