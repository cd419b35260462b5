use thiserror::Error;

/// Top-level error type for the `lectern-api` crate.
///
/// Covers every failure mode of the delivery client: credentials,
/// transport, CMS error envelopes, and response decoding.
/// `lectern-core` maps these into domain errors.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The CMS rejected the access token (HTTP 401).
    #[error("The access token you sent could not be found or is invalid")]
    InvalidAccessToken,

    /// Token could not be encoded as a header value.
    #[error("Invalid access token header value: {message}")]
    InvalidTokenHeader { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, reset, DNS failure, etc.)
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS or client construction error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── CMS ─────────────────────────────────────────────────────────
    /// Structured error envelope from the CMS
    /// (`{"sys": {"id": "NotFound"}, "message": "...", "requestId": "..."}`).
    #[error("{message}")]
    Cms {
        status: u16,
        id: Option<String>,
        message: String,
        request_id: Option<String>,
    },

    /// Rate limited by the CMS. Includes the reset hint in seconds when present.
    #[error("Rate limit exceeded")]
    RateLimited { reset_secs: Option<u64> },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the CMS reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Cms { status: 404, .. } => true,
            Self::Cms { id: Some(id), .. } => id == "NotFound",
            _ => false,
        }
    }

    /// Returns `true` for failures caused by credentials rather than the request.
    pub fn is_auth(&self) -> bool {
        matches!(
            self,
            Self::InvalidAccessToken | Self::InvalidTokenHeader { .. }
        )
    }

    /// The CMS request id, if the error envelope carried one.
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::Cms { request_id, .. } => request_id.as_deref(),
            _ => None,
        }
    }
}
