//! File-backed store for the site configuration document

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use super::{ConfigError, SiteConfiguration};

/// Default config file name, relative to the site directory
pub const CONFIG_FILE: &str = "config.json";

static TEMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// Durable storage for the single `SiteConfiguration` document.
///
/// Writes replace the whole document. There is no locking: concurrent
/// saves resolve as last-write-wins.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Create a store backed by the given file
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create a store for `config.json` inside a site directory
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        Self::new(dir.as_ref().join(CONFIG_FILE))
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the backing file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read and parse the persisted document
    pub fn load(&self) -> Result<SiteConfiguration, ConfigError> {
        let content =
            fs::read_to_string(&self.path).map_err(|source| ConfigError::NotFoundOrUnreadable {
                path: self.path.clone(),
                source,
            })?;

        let config = serde_json::from_str(&content).map_err(|source| ConfigError::Malformed {
            path: self.path.clone(),
            source,
        })?;

        tracing::debug!("Loaded config from {:?}", self.path);
        Ok(config)
    }

    /// Load the document, falling back to built-in defaults when it cannot be read
    pub fn load_or_default(&self) -> SiteConfiguration {
        match self.load() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Using default configuration: {}", e);
                SiteConfiguration::default()
            }
        }
    }

    /// Validate and persist a configuration, replacing the previous document
    pub fn save(&self, config: &SiteConfiguration) -> Result<(), ConfigError> {
        config.validate()?;

        let mut content = serde_json::to_string_pretty(config)?;
        content.push('\n');
        self.write_atomic(&content)?;

        tracing::info!("Saved config to {:?}", self.path);
        Ok(())
    }

    /// Validate an untrusted JSON document and persist it
    pub fn save_candidate(&self, candidate: Value) -> Result<SiteConfiguration, ConfigError> {
        let config = SiteConfiguration::from_candidate(candidate)?;
        self.save(&config)?;
        Ok(config)
    }

    /// Write the default document. Returns `false` if a document already
    /// exists and `force` is not set.
    pub fn init(&self, force: bool) -> Result<bool, ConfigError> {
        if self.exists() && !force {
            return Ok(false);
        }
        self.save(&SiteConfiguration::default())?;
        Ok(true)
    }

    /// Write to a sibling temporary file, then rename it over the target
    fn write_atomic(&self, content: &str) -> Result<(), ConfigError> {
        let write_failed = |source: std::io::Error| ConfigError::WriteFailed {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(write_failed)?;
            }
        }

        let temp_path = self.temp_path();
        fs::write(&temp_path, content).map_err(write_failed)?;

        if let Err(source) = fs::rename(&temp_path, &self.path) {
            let _ = fs::remove_file(&temp_path);
            return Err(write_failed(source));
        }

        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| CONFIG_FILE.to_string());
        let seq = TEMP_SEQ.fetch_add(1, Ordering::Relaxed);
        self.path
            .with_file_name(format!(".{}.{}.{}.tmp", file_name, std::process::id(), seq))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Language, PaginationVariant, Theme, ViewMode};
    use serde_json::json;
    use tempfile::TempDir;

    fn sample_config() -> SiteConfiguration {
        let mut config = SiteConfiguration::default();
        config.title = "Blog".to_string();
        config.theme = Theme::Dark;
        config.view_mode = ViewMode::Grid;
        config.language = Language::Zh;
        config.pagination_variant = PaginationVariant::Mixed;
        config.page_size = 12;
        config.search.enabled = true;
        config.card.border_color = Some("#ff0000".to_string());
        config.content.show_date = false;
        config
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::in_dir(dir.path());

        let config = sample_config();
        store.save(&config).unwrap();

        assert_eq!(store.load().unwrap(), config);
    }

    #[test]
    fn test_round_trip_without_description() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::in_dir(dir.path());

        let mut config = sample_config();
        config.description = None;
        store.save(&config).unwrap();

        assert_eq!(store.load().unwrap(), config);
    }

    #[test]
    fn test_invalid_save_leaves_document_untouched() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::in_dir(dir.path());

        let good = sample_config();
        store.save(&good).unwrap();
        let before = fs::read_to_string(store.path()).unwrap();

        let mut bad = good.clone();
        bad.title = String::new();
        let err = store.save(&bad).unwrap_err();
        assert!(err.is_validation_error());

        let err = store
            .save_candidate(json!({ "title": "Other", "viewMode": "list" }))
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingField("theme")));

        assert_eq!(fs::read_to_string(store.path()).unwrap(), before);
        assert_eq!(store.load().unwrap(), good);
    }

    #[test]
    fn test_save_replaces_whole_document() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::in_dir(dir.path());
        store.save(&sample_config()).unwrap();

        let saved = store
            .save_candidate(json!({ "title": "Fresh", "theme": "blue", "viewMode": "list" }))
            .unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, saved);
        assert_eq!(loaded.language, Language::En);
        assert!(loaded.content.show_date);
        assert_eq!(loaded.card.border_color, None);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::in_dir(dir.path());

        let err = store.load().unwrap_err();
        assert!(matches!(err, ConfigError::NotFoundOrUnreadable { .. }));
        assert!(err.is_read_error());
        assert_eq!(store.load_or_default(), SiteConfiguration::default());
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::in_dir(dir.path());
        fs::write(store.path(), "{ not json").unwrap();

        let err = store.load().unwrap_err();
        assert!(matches!(err, ConfigError::Malformed { .. }));
        assert_eq!(store.load_or_default(), SiteConfiguration::default());
    }

    #[test]
    fn test_saved_file_is_pretty_json() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::in_dir(dir.path());
        store.save(&sample_config()).unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        assert!(content.contains("\n  \"title\": \"Blog\""));
        assert!(content.ends_with('\n'));

        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_init_does_not_overwrite() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::in_dir(dir.path());

        assert!(store.init(false).unwrap());
        store.save(&sample_config()).unwrap();
        assert!(!store.init(false).unwrap());
        assert_eq!(store.load().unwrap(), sample_config());

        assert!(store.init(true).unwrap());
        assert_eq!(store.load().unwrap(), SiteConfiguration::default());
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::new(dir.path().join("src").join("config.json"));
        store.save(&sample_config()).unwrap();
        assert!(store.exists());
    }
}
