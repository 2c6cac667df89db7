use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chroma_fingerprint::{rank_palettes, to_device, DominantColorExtractor, Srgb};
use runway_chroma::assets::{AssetCategory, AssetLoader};
use runway_chroma::models::{load_manifest, AppConfig, ImageSource};
use runway_chroma::services::{
    decode_pixels, load_from_config, AnalysisPipeline, AnalysisReport, DEFAULT_TOP_PALETTES,
};

#[derive(Parser)]
#[command(name = "runway-chroma")]
#[command(about = "Chromatic fingerprinting of runway photographs against the Sanzo Wada palettes")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyse every image of a manifest and write the result tables
    Analyze(AnalyzeArgs),
    /// List the palette library, or rank palettes for a single image
    Palettes {
        /// Image to rank palettes for
        #[arg(short, long)]
        image: Option<PathBuf>,

        /// Number of ranked palettes to show
        #[arg(short = 'n', long, default_value_t = 5)]
        top: usize,

        /// Use the embedded palettes instead of fetching the catalog
        #[arg(long)]
        offline: bool,
    },
    /// Extract embedded assets to filesystem for customization
    Init {
        /// Extract config.yaml
        #[arg(long)]
        config: bool,

        /// Extract the example manifest
        #[arg(long)]
        manifest: bool,

        /// Extract all assets
        #[arg(long)]
        all: bool,

        /// Overwrite existing files
        #[arg(long, short)]
        force: bool,

        /// List embedded assets without extracting
        #[arg(long)]
        list: bool,
    },
}

/// Flags of `analyze`; each one overrides the config file
#[derive(Args)]
struct AnalyzeArgs {
    /// JSON manifest of images and their metadata
    #[arg(short, long)]
    manifest: PathBuf,

    /// Output directory for the JSON tables
    #[arg(short, long, default_value = "results")]
    output: PathBuf,

    /// Analyse at most this many images
    #[arg(long)]
    sample: Option<usize>,

    /// Dominant colors per image
    #[arg(long)]
    clusters: Option<usize>,

    /// Square edge length images are resized to
    #[arg(long)]
    resize: Option<u32>,

    /// Lloyd iteration cap
    #[arg(long)]
    max_iterations: Option<usize>,

    /// First year to include
    #[arg(long)]
    min_year: Option<i32>,

    /// Last year to include
    #[arg(long)]
    max_year: Option<i32>,

    /// Worker threads (default: CPU cores)
    #[arg(long)]
    workers: Option<usize>,

    /// Use the embedded palettes instead of fetching the catalog
    #[arg(long)]
    offline: bool,

    /// Palettes listed in top_palettes.json
    #[arg(long, default_value_t = DEFAULT_TOP_PALETTES)]
    top: usize,
}

impl AnalyzeArgs {
    fn apply(&self, config: &mut AppConfig) {
        let a = &mut config.analysis;
        if let Some(v) = self.sample {
            a.sample = Some(v);
        }
        if let Some(v) = self.clusters {
            a.clusters = v;
        }
        if let Some(v) = self.resize {
            a.resize = v;
        }
        if let Some(v) = self.max_iterations {
            a.max_iterations = v;
        }
        if let Some(v) = self.min_year {
            a.min_year = Some(v);
        }
        if let Some(v) = self.max_year {
            a.max_year = Some(v);
        }
        if let Some(v) = self.workers {
            a.workers = Some(v);
        }
        if self.offline {
            config.palette_source.offline = true;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Analyze(args)) => run_analyze_command(args).await,
        Some(Commands::Palettes {
            image,
            top,
            offline,
        }) => run_palettes_command(image.as_deref(), top, offline).await,
        Some(Commands::Init {
            config,
            manifest,
            all,
            force,
            list,
        }) => run_init_command(config, manifest, all, force, list),
        None => {
            run_status_command();
            Ok(())
        }
    }
}

fn init_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Load config from CONFIG_FILE or the embedded default
fn load_config() -> AppConfig {
    let loader = AssetLoader::from_env();
    if let Err(e) = loader.seed_if_configured() {
        tracing::warn!(%e, "Failed to seed config file");
    }
    AppConfig::load_from_assets(&loader)
}

async fn run_analyze_command(args: AnalyzeArgs) -> anyhow::Result<()> {
    init_tracing("runway_chroma=info");

    let mut config = load_config();
    args.apply(&mut config);
    config.validate()?;

    let entries = load_manifest(&args.manifest)?;
    let loaded = load_from_config(&config).await;

    let config = Arc::new(config);
    let pipeline = AnalysisPipeline::new(config.clone(), loaded.library.clone())?;

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(%e, "Cannot listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };
    let outcome = pipeline.run_until(entries, shutdown).await?;

    let report = AnalysisReport::build(&outcome, &loaded, &config, args.top)?;
    let files = report.write_to(&args.output)?;

    println!(
        "Processed {} of {} images ({} skipped){}",
        outcome.processed(),
        outcome.selected,
        outcome.skipped.len(),
        if outcome.interrupted { ", interrupted" } else { "" }
    );
    println!("Palettes: {}", loaded.origin);
    for f in &files {
        println!("  + {}", f.display());
    }
    Ok(())
}

async fn run_palettes_command(
    image: Option<&Path>,
    top: usize,
    offline: bool,
) -> anyhow::Result<()> {
    init_tracing("runway_chroma=warn");

    let mut config = load_config();
    if offline {
        config.palette_source.offline = true;
    }
    config.validate()?;
    let loaded = load_from_config(&config).await;
    let library = &loaded.library;

    let Some(path) = image else {
        println!("{} palettes from {}\n", library.len(), loaded.origin);
        for palette in library.iter() {
            println!(
                "  {:>5}  {:<28} {}",
                palette.id().as_str(),
                palette.name(),
                palette.hex_colors().join(" ")
            );
        }
        return Ok(());
    };

    let id = path.display().to_string();
    let pixels = decode_pixels(
        &id,
        &ImageSource::Path(path.to_path_buf()),
        config.analysis.resize,
    )?;
    let extractor = DominantColorExtractor::new(config.extract_options())?;
    let clusters = extractor.extract(pixels);

    println!("Dominant colors of {id}:");
    for c in &clusters {
        let hex = Srgb::from_bytes(to_device(c.centroid));
        println!("  {hex}  {:5.1}%", c.weight * 100.0);
    }

    println!("\nBest palettes:");
    for (rank, m) in rank_palettes(&clusters, library, top)?.iter().enumerate() {
        println!(
            "  {}. {:>5}  {:<28} {:6.2}  {}",
            rank + 1,
            m.palette_id.as_str(),
            m.palette_name,
            m.distance,
            m.strength()
        );
    }
    Ok(())
}

fn run_init_command(
    config: bool,
    manifest: bool,
    all: bool,
    force: bool,
    list: bool,
) -> anyhow::Result<()> {
    if list {
        println!("Embedded assets:\n");
        for f in AssetLoader::list_embedded() {
            println!("  {f}");
        }
        return Ok(());
    }

    let mut categories = Vec::new();
    if all || config {
        categories.push(AssetCategory::Config);
    }
    if all || manifest {
        categories.push(AssetCategory::Manifest);
    }

    if categories.is_empty() {
        eprintln!("No categories specified. Use --all, --config, or --manifest");
        eprintln!("\nRun 'runway-chroma init --list' to see embedded assets.");
        std::process::exit(1);
    }

    let report = AssetLoader::from_env().init(&categories, force)?;

    if !report.written.is_empty() {
        println!("Extracted {} files:", report.written.len());
        for f in &report.written {
            println!("  + {f}");
        }
    }
    if !report.skipped.is_empty() {
        println!(
            "\nSkipped {} existing files (use --force to overwrite):",
            report.skipped.len()
        );
        for f in &report.skipped {
            println!("  - {f}");
        }
    }

    if report.written.is_empty() && report.skipped.is_empty() {
        println!("No files to extract.");
    }

    Ok(())
}

fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let config_file = std::env::var("CONFIG_FILE").ok();
    let rust_log = std::env::var("RUST_LOG").ok();

    println!("Runway Chroma v{VERSION}");
    println!("Chromatic fingerprinting of runway photographs\n");

    println!("Environment Variables:");
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  RUST_LOG    = {}",
        rust_log.as_deref().unwrap_or("(not set)")
    );

    println!("\nConfiguration:");
    let loader = AssetLoader::from_env();
    let source = match loader.config_file() {
        Some(path) if loader.uses_external_config() => path.display().to_string(),
        Some(_) => "embedded (file not found)".to_string(),
        None => "embedded".to_string(),
    };
    println!("  Source:   {source}");

    let config = AppConfig::load_from_assets(&loader);
    match config.validate() {
        Ok(()) => {
            println!(
                "  Analysis: {} clusters, {}px, {} iterations, {} workers",
                config.analysis.clusters,
                config.analysis.resize,
                config.analysis.max_iterations,
                config.worker_count()
            );
            if config.palette_source.offline {
                println!("  Palettes: embedded (offline)");
            } else {
                println!("  Palettes: {}", config.palette_source.url);
            }
        }
        Err(e) => println!("  Invalid:  {e}"),
    }

    println!("\nCommands:");
    println!("  runway-chroma analyze    Analyse a manifest and write result tables");
    println!("  runway-chroma palettes   List palettes or rank them for one image");
    println!("  runway-chroma init       Extract embedded assets");
    println!("\nRun 'runway-chroma --help' for more details.");
}
