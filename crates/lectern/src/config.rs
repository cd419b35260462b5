//! CLI configuration: a thin wrapper around `lectern_config`.
//!
//! Loads the layered config honoring `--config`, and builds the runtime
//! pieces (content service, server options) the commands need.

use lectern::server::ServerOptions;
use lectern_core::{CallTracker, ContentService};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use lectern_config::{Config, config_path};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Load configuration from `--config` (or the default path) plus environment.
pub fn load(global: &GlobalOpts) -> Result<Config, CliError> {
    Ok(lectern_config::load_config(global.config.as_deref())?)
}

/// Connect a content service with a fresh call tracker.
///
/// Missing credentials only warn here; commands fail on first request.
pub fn content_service(cfg: &Config) -> Result<ContentService, CliError> {
    let source = lectern_core::connect(&cfg.cms_config())?;
    Ok(ContentService::new(source, CallTracker::new()))
}

pub fn server_options(cfg: &Config) -> ServerOptions {
    ServerOptions {
        quizzes_ttl: cfg.cache.quizzes_ttl(),
        revalidate_secret: cfg
            .server
            .revalidate_secret
            .clone()
            .filter(|s| !s.is_empty()),
    }
}
