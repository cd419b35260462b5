//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use lectern_config::ConfigError;
use lectern_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const CONFIG: i32 = 9;
}

#[derive(Debug, Error, Diagnostic)]
#[allow(unused_assignments)]
pub enum CliError {
    // ── Configuration ────────────────────────────────────────────────
    #[error("CMS is not configured: missing {missing}")]
    #[diagnostic(
        code(lectern::not_configured),
        help(
            "Set the missing environment variables, or add them to the\n\
             [contentful] table of {path}"
        )
    )]
    NotConfigured { missing: String, path: String },

    #[error("Invalid configuration: {0}")]
    #[diagnostic(
        code(lectern::config),
        help("Check the config file and LECTERN_* / CONTENTFUL_* variables.")
    )]
    Config(#[from] ConfigError),

    // ── Authentication ───────────────────────────────────────────────
    #[error("The CMS rejected the access token: {message}")]
    #[diagnostic(
        code(lectern::auth_failed),
        help(
            "Check CONTENTFUL_ACCESS_TOKEN (or CONTENTFUL_PREVIEW_ACCESS_TOKEN\n\
             when preview mode is on) against the space's API keys."
        )
    )]
    AuthFailed { message: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(code(lectern::not_found))]
    NotFound {
        resource_type: String,
        identifier: String,
    },

    #[error("Entry does not match its content type: {0}")]
    #[diagnostic(code(lectern::invalid_entry))]
    InvalidEntry(String),

    // ── Upstream ─────────────────────────────────────────────────────
    #[error("Rate limited by the CMS")]
    #[diagnostic(
        code(lectern::rate_limited),
        help("Wait for the CMS rate limit window to reset, then retry.")
    )]
    RateLimited { reset_secs: Option<u64> },

    #[error("CMS request failed: {message}")]
    #[diagnostic(code(lectern::upstream))]
    Upstream { message: String, status: Option<u16> },

    // ── Server ───────────────────────────────────────────────────────
    #[error("Server error on {addr}")]
    #[diagnostic(
        code(lectern::server),
        help("Is another process already listening on this address? Try --port.")
    )]
    Server {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    // ── Misc ─────────────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(lectern::validation))]
    Validation { field: String, reason: String },

    #[error("Internal error: {0}")]
    #[diagnostic(code(lectern::internal))]
    Internal(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotConfigured { .. } | Self::Config(_) => exit_code::CONFIG,
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } => exit_code::USAGE,
            Self::Upstream { status: None, .. } | Self::Server { .. } => exit_code::CONNECTION,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotConfigured { missing } => CliError::NotConfigured {
                missing: missing.join(", "),
                path: lectern_config::config_path().display().to_string(),
            },
            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },
            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },
            CoreError::RateLimited { reset_secs } => CliError::RateLimited { reset_secs },
            CoreError::Upstream { message, status } => CliError::Upstream { message, status },
            CoreError::NotFound {
                entity_type,
                identifier,
            } => CliError::NotFound {
                resource_type: entity_type,
                identifier,
            },
            CoreError::Validation(e) => CliError::InvalidEntry(e.to_string()),
            CoreError::Internal(message) => CliError::Internal(message),
        }
    }
}
