//! Palette catalog loading with embedded fallback.
//!
//! The remote catalog is a JSON array of `{id, name, colors: [hex...]}`.
//! Whatever goes wrong while fetching it, [`load_library`] still returns a
//! usable library built from the embedded palettes.

use crate::error::SourceError;
use crate::models::AppConfig;
use async_trait::async_trait;
use chroma_fingerprint::{PaletteLibrary, ReferencePalette};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Something that can produce reference palettes
#[async_trait]
pub trait PaletteSource: Send + Sync {
    /// Fetch and validate the palettes. An empty result is an error.
    async fn fetch(&self) -> Result<Vec<ReferencePalette>, SourceError>;

    /// Human-readable location for logs and the run summary
    fn describe(&self) -> String;
}

/// Which set of palettes the run ended up using
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibraryOrigin {
    Catalog(String),
    Fallback { reason: String },
}

impl fmt::Display for LibraryOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LibraryOrigin::Catalog(url) => write!(f, "catalog ({url})"),
            LibraryOrigin::Fallback { reason } => write!(f, "embedded fallback ({reason})"),
        }
    }
}

/// A loaded library together with where it came from
#[derive(Debug, Clone)]
pub struct LoadedLibrary {
    pub library: Arc<PaletteLibrary>,
    pub origin: LibraryOrigin,
}

/// Load the library from `source`, falling back to the embedded palettes.
pub async fn load_library(source: &dyn PaletteSource) -> LoadedLibrary {
    match source.fetch().await {
        Ok(palettes) => {
            let library = PaletteLibrary::new(palettes);
            tracing::info!(
                source = %source.describe(),
                palettes = library.len(),
                colors = library.color_count(),
                "Loaded palette catalog"
            );
            LoadedLibrary {
                library: Arc::new(library),
                origin: LibraryOrigin::Catalog(source.describe()),
            }
        }
        Err(SourceError::Offline) => {
            tracing::info!("Offline mode, using embedded palettes");
            fallback(SourceError::Offline)
        }
        Err(e) => {
            tracing::warn!(
                %e,
                source = %source.describe(),
                "Palette source unavailable, using embedded palettes"
            );
            fallback(e)
        }
    }
}

/// Load the library the configuration asks for. Never fails.
pub async fn load_from_config(config: &AppConfig) -> LoadedLibrary {
    match source_from_config(config) {
        Ok(source) => load_library(source.as_ref()).await,
        Err(e) => {
            tracing::warn!(%e, "Cannot build palette source, using embedded palettes");
            fallback(e)
        }
    }
}

fn fallback(reason: SourceError) -> LoadedLibrary {
    LoadedLibrary {
        library: Arc::new(PaletteLibrary::fallback()),
        origin: LibraryOrigin::Fallback {
            reason: reason.to_string(),
        },
    }
}

/// Build the source described by the configuration.
pub fn source_from_config(config: &AppConfig) -> Result<Box<dyn PaletteSource>, SourceError> {
    if config.palette_source.offline {
        return Ok(Box::new(OfflineSource));
    }
    let source = HttpCatalogSource::new(
        &config.palette_source.url,
        Duration::from_secs(config.palette_source.timeout_secs),
        config.palette_names.clone(),
    )?;
    Ok(Box::new(source))
}

/// Source that never fetches; always yields the embedded palettes
pub struct OfflineSource;

#[async_trait]
impl PaletteSource for OfflineSource {
    async fn fetch(&self) -> Result<Vec<ReferencePalette>, SourceError> {
        Err(SourceError::Offline)
    }

    fn describe(&self) -> String {
        "offline".to_string()
    }
}

/// Catalog served over HTTP
pub struct HttpCatalogSource {
    client: reqwest::Client,
    url: String,
    names: HashMap<String, String>,
}

impl HttpCatalogSource {
    /// `names` translates catalog display names, e.g. Japanese to English.
    pub fn new(
        url: impl Into<String>,
        timeout: Duration,
        names: HashMap<String, String>,
    ) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
            names,
        })
    }
}

#[async_trait]
impl PaletteSource for HttpCatalogSource {
    async fn fetch(&self) -> Result<Vec<ReferencePalette>, SourceError> {
        tracing::debug!(url = %self.url, "Fetching palette catalog");

        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let palettes = parse_catalog(&body, &self.names)?;
        if palettes.is_empty() {
            return Err(SourceError::Empty);
        }
        Ok(palettes)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogId {
    Text(String),
    Number(u64),
}

#[derive(Deserialize)]
struct CatalogEntry {
    #[serde(default)]
    id: Option<CatalogId>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    colors: Vec<String>,
}

/// Parse catalog JSON into palettes.
///
/// Entries without an id use their name. Entries that fail validation are
/// skipped with a warning; of several entries with the same id the first is
/// kept.
pub fn parse_catalog(
    body: &[u8],
    names: &HashMap<String, String>,
) -> Result<Vec<ReferencePalette>, SourceError> {
    let entries: Vec<CatalogEntry> = serde_json::from_slice(body)?;

    let mut seen = HashSet::new();
    let mut palettes = Vec::with_capacity(entries.len());

    for (index, entry) in entries.into_iter().enumerate() {
        let id = match (entry.id, &entry.name) {
            (Some(CatalogId::Text(id)), _) => id,
            (Some(CatalogId::Number(n)), _) => n.to_string(),
            (None, Some(name)) => name.clone(),
            (None, None) => {
                tracing::warn!(index, "Skipping catalog entry without id or name");
                continue;
            }
        };
        let raw_name = entry.name.unwrap_or_else(|| id.clone());
        let name = names.get(&raw_name).cloned().unwrap_or(raw_name);

        if seen.contains(&id) {
            tracing::warn!(index, id = %id, "Skipping duplicate palette id");
            continue;
        }

        match ReferencePalette::from_hex(id.as_str(), name, entry.colors.as_slice()) {
            Ok(palette) => {
                seen.insert(id);
                palettes.push(palette);
            }
            Err(e) => tracing::warn!(%e, index, id = %id, "Skipping invalid catalog entry"),
        }
    }

    Ok(palettes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> HashMap<String, String> {
        HashMap::from([("紺青".to_string(), "Navy Blue".to_string())])
    }

    #[test]
    fn test_parse_catalog_basic() {
        let body = br##"[
            {"id": "002", "name": "Shrimp Brown", "colors": ["#772C25", "#AF4436"]},
            {"id": "001", "name": "Plum Mouse Gray", "colors": ["917877"]}
        ]"##;
        let palettes = parse_catalog(body, &HashMap::new()).unwrap();

        assert_eq!(palettes.len(), 2);
        assert_eq!(palettes[0].id().as_str(), "002");
        assert_eq!(palettes[0].len(), 2);
        assert_eq!(palettes[1].hex_colors(), vec!["#917877"]);
    }

    #[test]
    fn test_parse_catalog_numeric_id_and_missing_id() {
        let body = r##"[
            {"id": 7, "name": "Seven", "colors": ["#000000"]},
            {"name": "紺青", "colors": ["#003854"]}
        ]"##;
        let palettes = parse_catalog(body.as_bytes(), &names()).unwrap();

        assert_eq!(palettes[0].id().as_str(), "7");
        assert_eq!(palettes[1].id().as_str(), "紺青");
        assert_eq!(palettes[1].name(), "Navy Blue");
    }

    #[test]
    fn test_parse_catalog_skips_invalid_entries() {
        let body = br##"[
            {"id": "1", "name": "Empty", "colors": []},
            {"id": "2", "name": "Bad hex", "colors": ["#GGGGGG"]},
            {"colors": ["#FFFFFF"]},
            {"id": "3", "name": "Good", "colors": ["#FFFFFF"]}
        ]"##;
        let palettes = parse_catalog(body, &HashMap::new()).unwrap();

        assert_eq!(palettes.len(), 1);
        assert_eq!(palettes[0].id().as_str(), "3");
    }

    #[test]
    fn test_parse_catalog_keeps_first_duplicate() {
        let body = br##"[
            {"id": "1", "name": "First", "colors": ["#FFFFFF"]},
            {"id": "1", "name": "Second", "colors": ["#000000"]}
        ]"##;
        let palettes = parse_catalog(body, &HashMap::new()).unwrap();

        assert_eq!(palettes.len(), 1);
        assert_eq!(palettes[0].name(), "First");
    }

    #[test]
    fn test_parse_catalog_invalid_json() {
        let err = parse_catalog(b"<html>", &HashMap::new()).unwrap_err();
        assert!(matches!(err, SourceError::Json(_)));
    }

    #[tokio::test]
    async fn test_offline_source_uses_fallback() {
        let loaded = load_library(&OfflineSource).await;

        assert_eq!(loaded.library.len(), 30);
        assert!(matches!(loaded.origin, LibraryOrigin::Fallback { .. }));
    }

    #[tokio::test]
    async fn test_load_from_config_offline() {
        let mut config = AppConfig::default();
        config.palette_source.offline = true;
        let loaded = load_from_config(&config).await;

        assert_eq!(loaded.library.len(), 30);
        assert_eq!(
            loaded.origin.to_string(),
            "embedded fallback (Palette source disabled (offline))"
        );
    }

    #[test]
    fn test_source_from_config_offline() {
        let mut config = AppConfig::default();
        config.palette_source.offline = true;
        let source = source_from_config(&config).unwrap();
        assert_eq!(source.describe(), "offline");
    }
}
