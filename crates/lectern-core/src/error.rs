// ── Core error types ──
//
// Domain errors surfaced to route handlers and the CLI. Upstream failures
// keep the CMS or transport message verbatim so callers can pass it on.
// The `From<lectern_api::Error>` impl translates transport-layer errors.

use thiserror::Error;

use crate::convert::ValidationError;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Configuration ────────────────────────────────────────────────
    /// Required CMS settings were absent at startup; surfaced on first use.
    #[error("CMS is not configured: missing {}", missing.join(", "))]
    NotConfigured { missing: Vec<String> },

    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Upstream ─────────────────────────────────────────────────────
    /// The CMS rejected our credentials.
    #[error("{message}")]
    AuthenticationFailed { message: String },

    #[error("Rate limited by the CMS")]
    RateLimited { reset_secs: Option<u64> },

    /// Any other failure talking to the CMS. Displays the message unchanged.
    #[error("{message}")]
    Upstream {
        message: String,
        /// HTTP status returned by the CMS (if any).
        status: Option<u16>,
    },

    // ── Data ─────────────────────────────────────────────────────────
    #[error("{entity_type} '{identifier}' not found")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    /// A CMS entry did not match the expected schema.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<lectern_api::Error> for CoreError {
    fn from(err: lectern_api::Error) -> Self {
        match err {
            lectern_api::Error::InvalidAccessToken
            | lectern_api::Error::InvalidTokenHeader { .. } => CoreError::AuthenticationFailed {
                message: err.to_string(),
            },
            lectern_api::Error::RateLimited { reset_secs } => CoreError::RateLimited { reset_secs },
            lectern_api::Error::Cms { status, message, .. } => CoreError::Upstream {
                message,
                status: Some(status),
            },
            lectern_api::Error::Transport(ref e) => CoreError::Upstream {
                status: e.status().map(|s| s.as_u16()),
                message: err.to_string(),
            },
            lectern_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            lectern_api::Error::Tls(msg) => CoreError::Config {
                message: format!("TLS error: {msg}"),
            },
            lectern_api::Error::Deserialization { message, body: _ } => CoreError::Upstream {
                message: format!("Deserialization error: {message}"),
                status: None,
            },
        }
    }
}
