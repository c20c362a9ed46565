//! Application state management

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::Config;
use crate::iiif::IiifUris;
use crate::image::ImageServerClient;
use crate::text::{AltoFileProvider, WordStreamCache, WordStreamProvider};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    db: SqlitePool,
    word_streams: WordStreamCache,
    image_server: ImageServerClient,
    uris: IiifUris,
}

impl AppState {
    /// Create state reading word streams from the configured data directory
    pub fn new(config: Config, db: SqlitePool) -> Self {
        let provider = Arc::new(AltoFileProvider::new(&config.storage.data_path));
        Self::with_provider(config, db, provider)
    }

    /// Create state with a custom word stream provider
    pub fn with_provider(
        config: Config,
        db: SqlitePool,
        provider: Arc<dyn WordStreamProvider>,
    ) -> Self {
        let word_streams = WordStreamCache::new(provider, config.storage.word_cache_size);
        let image_server = ImageServerClient::new(&config.image_server);
        let uris = IiifUris::new(&config.server.base_url);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                db,
                word_streams,
                image_server,
                uris,
            }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the database pool
    pub fn db(&self) -> &SqlitePool {
        &self.inner.db
    }

    /// Get the word stream cache
    pub fn word_streams(&self) -> &WordStreamCache {
        &self.inner.word_streams
    }

    pub fn image_server(&self) -> &ImageServerClient {
        &self.inner.image_server
    }

    pub fn uris(&self) -> &IiifUris {
        &self.inner.uris
    }
}
