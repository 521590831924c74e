//! HTTP server: rendered pages plus the admin config endpoint

mod admin;
mod api;
mod pages;

use anyhow::Result;
use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tower_http::trace::TraceLayer;

use crate::cache::ListingCache;
use crate::config::{ConfigError, ConfigStore, SiteConfiguration};
use crate::content::{ContentSource, ListingQuery, PostPage};
use crate::Showcase;

pub use admin::{AdminForm, AdminParams};
pub use pages::{DetailParams, ListingParams};

/// Shared server state
pub struct AppState<S> {
    pub store: ConfigStore,
    pub source: S,
    pub cache: ListingCache,
    /// Origin used when building absolute share links
    pub public_url: String,
}

impl<S: ContentSource> AppState<S> {
    pub fn new(store: ConfigStore, source: S, public_url: impl Into<String>) -> Self {
        Self {
            store,
            source,
            cache: ListingCache::new(),
            public_url: public_url.into(),
        }
    }

    /// Read the persisted config, rendering with defaults when it is unusable
    async fn config_or_default(&self) -> SiteConfiguration {
        match with_store(&self.store, |store| store.load()).await {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Rendering with default config: {}", e);
                SiteConfiguration::default()
            }
        }
    }

    /// Page one of the listing in the configured language.
    ///
    /// Served from the cache while the revalidate window lasts. A failed
    /// fetch yields an empty page and the error message.
    async fn snapshot(&self, config: &SiteConfiguration) -> (PostPage, Option<String>) {
        let query = ListingQuery::new(config.language, 1, config.page_size);
        let window = Duration::from_secs(config.revalidate_seconds);

        if let Some(page) = self.cache.get(&query, window) {
            tracing::debug!("Listing snapshot served from cache");
            return (page, None);
        }

        match self.source.list_posts(&query).await {
            Ok(page) => {
                self.cache.insert(query, page.clone(), window);
                (page, None)
            }
            Err(e) => {
                tracing::error!("Failed to fetch posts: {}", e);
                (PostPage::empty(), Some(e.to_string()))
            }
        }
    }
}

/// Failures surfaced by handlers
#[derive(Error, Debug)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Run a blocking config store operation off the async runtime
async fn with_store<T, F>(store: &ConfigStore, f: F) -> Result<T, ServerError>
where
    F: FnOnce(ConfigStore) -> Result<T, ConfigError> + Send + 'static,
    T: Send + 'static,
{
    let store = store.clone();
    Ok(tokio::task::spawn_blocking(move || f(store)).await??)
}

/// Build the application router
pub fn router<S: ContentSource>(state: Arc<AppState<S>>) -> Router {
    Router::new()
        .route("/", get(pages::listing::<S>))
        .route("/posts/:slug", get(pages::post_detail::<S>))
        .route(
            "/admin",
            get(admin::admin_page::<S>).post(admin::admin_submit::<S>),
        )
        .route(
            "/admin/api/config",
            get(api::get_config::<S>).post(api::post_config::<S>),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server
pub async fn start(showcase: &Showcase, ip: &str, port: u16, public_url: Option<String>) -> Result<()> {
    let source = showcase.content_source()?;
    tracing::info!("Serving {} posts from {:?}", source.len(), showcase.posts_path);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    let public_url = public_url.unwrap_or_else(|| url.clone());

    let state = Arc::new(AppState::new(showcase.store.clone(), source, public_url));
    let app = router(state);

    tracing::warn!("The admin endpoints at /admin are not authenticated");
    println!("Server running at {}", url);
    println!("Admin panel at {}/admin", url);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
