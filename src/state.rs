//! Application state shared across all request handlers.

use std::sync::Arc;

use moka::future::Cache;

use crate::cms::client::CmsClient;
use crate::config::Config;

/// Cached HTML response with metadata for TTL decisions.
#[derive(Clone, Debug)]
pub struct CachedHtml {
    /// Rendered HTML string.
    pub html: String,
    /// When this entry was cached.
    pub cached_at: chrono::DateTime<chrono::Utc>,
}

impl CachedHtml {
    pub fn new(html: String) -> Self {
        Self {
            html,
            cached_at: chrono::Utc::now(),
        }
    }
}

/// Type alias for the rendered-page cache.
pub type PageCache = Cache<String, CachedHtml>;

/// Default cache capacity (number of entries).
/// Each entry is typically 5-30KB of HTML, so 10K entries ~= 50-300MB.
const DEFAULT_CACHE_CAPACITY: u64 = 10_000;

/// TTL for cached published pages. Preview mode never touches the cache,
/// so authors see drafts immediately; readers may lag by at most this long.
const DEFAULT_CACHE_TTL: std::time::Duration = std::time::Duration::from_secs(300);

/// Shared application state available to all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Client for the headless CMS query API.
    pub cms: CmsClient,

    /// Application configuration.
    pub config: Arc<Config>,

    /// In-memory cache of rendered published pages, keyed by route.
    pub cache: PageCache,
}

impl AppState {
    /// Create a new application state from configuration.
    ///
    /// The CMS client is built exactly once here from immutable configuration
    /// and shared by clone across concurrent requests.
    pub fn new(config: Config) -> Self {
        let cms = CmsClient::new(&config);

        let cache = Cache::builder()
            .max_capacity(DEFAULT_CACHE_CAPACITY)
            .time_to_live(DEFAULT_CACHE_TTL)
            .build();

        tracing::info!(
            cache_capacity = DEFAULT_CACHE_CAPACITY,
            cache_ttl_secs = DEFAULT_CACHE_TTL.as_secs(),
            "application state initialized"
        );

        Self {
            cms,
            config: Arc::new(config),
            cache,
        }
    }
}
