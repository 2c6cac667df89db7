//! Asset loading with embedded fallbacks
//!
//! The default `config.yaml` and an example manifest are compiled into the
//! binary:
//!
//! - If `CONFIG_FILE` is NOT set: use the embedded config only
//! - If `CONFIG_FILE` IS set and the file is missing: seed it with the embedded default
//! - If `CONFIG_FILE` IS set and the file exists: use it

use rust_embed::RustEmbed;
use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Embedded default config and manifest template
#[derive(RustEmbed)]
#[folder = "."]
#[include = "config.yaml"]
#[include = "manifest.example.json"]
struct EmbeddedAssets;

const CONFIG_NAME: &str = "config.yaml";
const MANIFEST_NAME: &str = "manifest.example.json";

/// Asset category for selective operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetCategory {
    Config,
    Manifest,
}

impl AssetCategory {
    fn file_name(self) -> &'static str {
        match self {
            AssetCategory::Config => CONFIG_NAME,
            AssetCategory::Manifest => MANIFEST_NAME,
        }
    }
}

/// Report of init (extraction) operations
#[derive(Debug, Default)]
pub struct InitReport {
    pub written: Vec<String>,
    pub skipped: Vec<String>,
}

/// Asset loader with optional filesystem override
pub struct AssetLoader {
    /// External config file path (from CONFIG_FILE env var)
    config_file: Option<PathBuf>,
}

impl AssetLoader {
    /// Create a new asset loader
    ///
    /// `config_file` should be `Some` only if `CONFIG_FILE` was set.
    pub fn new(config_file: Option<PathBuf>) -> Self {
        Self { config_file }
    }

    /// Create a loader from the `CONFIG_FILE` environment variable.
    pub fn from_env() -> Self {
        Self::new(std::env::var("CONFIG_FILE").ok().map(PathBuf::from))
    }

    pub fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }

    /// Whether the external config file is configured and present.
    pub fn uses_external_config(&self) -> bool {
        self.config_file.as_deref().is_some_and(Path::exists)
    }

    /// Read the config file
    ///
    /// If an external path is configured and exists, uses that.
    /// Otherwise falls back to embedded config.
    pub fn read_config(&self) -> io::Result<Cow<'static, [u8]>> {
        if let Some(ref path) = self.config_file {
            if path.exists() {
                tracing::trace!(path = %path.display(), "Loading config from filesystem");
                return Ok(Cow::Owned(fs::read(path)?));
            }
        }

        EmbeddedAssets::get(CONFIG_NAME)
            .map(|f| {
                tracing::trace!("Loading config from embedded assets");
                f.data
            })
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "Embedded config.yaml not found"))
    }

    /// Read config as a UTF-8 string
    pub fn read_config_string(&self) -> io::Result<String> {
        let bytes = self.read_config()?;
        String::from_utf8(bytes.into_owned()).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Seed a configured but missing config file with the embedded default.
    ///
    /// Returns true when a file was written.
    pub fn seed_if_configured(&self) -> io::Result<bool> {
        let Some(ref path) = self.config_file else {
            return Ok(false);
        };
        if path.exists() {
            return Ok(false);
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        match EmbeddedAssets::get(CONFIG_NAME) {
            Some(data) => {
                fs::write(path, &*data.data)?;
                tracing::info!(path = %path.display(), "Seeded config file with embedded default");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Extract embedded assets to the filesystem (init command)
    ///
    /// The config goes to `CONFIG_FILE` when set, otherwise `./config.yaml`;
    /// the manifest template goes to the current directory.
    pub fn init(&self, categories: &[AssetCategory], force: bool) -> io::Result<InitReport> {
        let mut report = InitReport::default();

        for &category in categories {
            let path = match category {
                AssetCategory::Config => self
                    .config_file
                    .clone()
                    .unwrap_or_else(|| PathBuf::from(CONFIG_NAME)),
                AssetCategory::Manifest => PathBuf::from(MANIFEST_NAME),
            };

            if !force && path.exists() {
                report.skipped.push(path.display().to_string());
                continue;
            }
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            if let Some(data) = EmbeddedAssets::get(category.file_name()) {
                fs::write(&path, &*data.data)?;
                report.written.push(path.display().to_string());
            }
        }

        Ok(report)
    }

    /// List embedded assets (for display)
    pub fn list_embedded() -> Vec<String> {
        EmbeddedAssets::iter().map(|s| s.to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_config_is_readable() {
        let loader = AssetLoader::new(None);
        let content = loader.read_config_string().unwrap();
        assert!(content.contains("analysis:"));
        assert!(!loader.uses_external_config());
    }

    #[test]
    fn test_external_config_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.yaml");
        fs::write(&path, "designer_min_images: 7\n").unwrap();

        let loader = AssetLoader::new(Some(path));
        assert!(loader.uses_external_config());
        assert_eq!(loader.read_config_string().unwrap(), "designer_min_images: 7\n");
    }

    #[test]
    fn test_missing_external_config_falls_back_and_seeds() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let loader = AssetLoader::new(Some(path.clone()));
        assert!(loader.read_config_string().unwrap().contains("analysis:"));

        assert!(loader.seed_if_configured().unwrap());
        assert!(path.exists());
        assert!(!loader.seed_if_configured().unwrap());
    }

    #[test]
    fn test_init_skips_existing_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "# mine\n").unwrap();

        let loader = AssetLoader::new(Some(path.clone()));
        let report = loader.init(&[AssetCategory::Config], false).unwrap();
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), "# mine\n");

        let report = loader.init(&[AssetCategory::Config], true).unwrap();
        assert_eq!(report.written.len(), 1);
        assert!(fs::read_to_string(&path).unwrap().contains("analysis:"));
    }

    #[test]
    fn test_list_embedded() {
        let mut assets = AssetLoader::list_embedded();
        assets.sort();
        assert_eq!(assets, vec!["config.yaml", "manifest.example.json"]);
    }
}
