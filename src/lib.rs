//! blogflow-showcase: a showcase site and admin config service for BlogFlow blogs
//!
//! Posts come from a content source; the site-wide display defaults live in a
//! single JSON document edited through the admin page or its JSON endpoint.

pub mod cache;
pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;
pub mod i18n;
pub mod server;
pub mod state;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use config::{ConfigStore, SiteConfiguration, CONFIG_FILE};
use content::FixtureSource;

/// Default name of the posts file served by the fixture content source
pub const POSTS_FILE: &str = "posts.json";

/// The main showcase application
#[derive(Debug, Clone)]
pub struct Showcase {
    /// Base directory
    pub base_dir: PathBuf,
    /// Site configuration document
    pub config_path: PathBuf,
    /// Posts served by the fixture content source
    pub posts_path: PathBuf,
    /// Store for the configuration document
    pub store: ConfigStore,
}

impl Showcase {
    /// Create a showcase rooted at a directory with the default file names
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        Self::with_paths(base_dir, None, None)
    }

    /// Create a showcase, resolving relative overrides against `base_dir`
    pub fn with_paths<P: AsRef<Path>>(
        base_dir: P,
        config_path: Option<PathBuf>,
        posts_path: Option<PathBuf>,
    ) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let resolve = |path: Option<PathBuf>, default: &str| match path {
            Some(p) if p.is_absolute() => p,
            Some(p) => base_dir.join(p),
            None => base_dir.join(default),
        };

        let config_path = resolve(config_path, CONFIG_FILE);
        let posts_path = resolve(posts_path, POSTS_FILE);
        let store = ConfigStore::new(&config_path);

        Self {
            base_dir,
            config_path,
            posts_path,
            store,
        }
    }

    /// The persisted configuration, or defaults if it cannot be read
    pub fn config(&self) -> SiteConfiguration {
        self.store.load_or_default()
    }

    /// Posts to serve. A missing posts file serves an empty blog.
    pub fn content_source(&self) -> Result<FixtureSource> {
        if !self.posts_path.exists() {
            tracing::warn!("Posts file {:?} not found, serving no posts", self.posts_path);
            return Ok(FixtureSource::default());
        }
        FixtureSource::from_file(&self.posts_path)
            .with_context(|| format!("Failed to load posts from {:?}", self.posts_path))
    }

    /// Initialize the configuration and sample posts
    pub fn init(&self, force: bool) -> Result<()> {
        commands::init::run(self, force)
    }

    /// Validate the configuration and posts files
    pub fn check(&self) -> Result<()> {
        commands::show::check(self)
    }
}
