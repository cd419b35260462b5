// ── Shared application state ──

use std::sync::Arc;
use std::time::Duration;

use lectern_core::{CallTracker, ContentService, ResponseCache};

/// Route-level settings fixed at startup.
#[derive(Debug, Clone)]
pub struct ServerOptions {
    /// Lifetime of the cached quiz listing.
    pub quizzes_ttl: Duration,
    /// Secret expected by the revalidation endpoint, if any.
    pub revalidate_secret: Option<String>,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            quizzes_ttl: Duration::from_secs(30 * 60),
            revalidate_secret: None,
        }
    }
}

/// State handed to every handler. Clones share the cache, the tracker and
/// the CMS source.
#[derive(Clone)]
pub struct AppState {
    pub service: ContentService,
    pub cache: ResponseCache,
    pub options: Arc<ServerOptions>,
}

impl AppState {
    pub fn new(service: ContentService, options: ServerOptions) -> Self {
        Self {
            service,
            cache: ResponseCache::new(),
            options: Arc::new(options),
        }
    }

    pub fn tracker(&self) -> &CallTracker {
        self.service.tracker()
    }
}
