// ── Runtime CMS configuration ──
//
// Describes *how* to reach the CMS. Carries credentials and connection
// tuning but never touches disk or the environment; `lectern-config`
// builds one and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

/// Default CMS environment name.
pub const DEFAULT_ENVIRONMENT: &str = "master";

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// Bundled root store.
    #[default]
    SystemDefaults,
    /// Additional custom CA certificate file.
    CustomCa(PathBuf),
}

/// Connection settings for one CMS space/environment.
///
/// Required values are optional here on purpose: missing settings are
/// reported as warnings at startup and as errors on first request.
#[derive(Debug, Clone)]
pub struct CmsConfig {
    pub space_id: Option<String>,
    /// Environment name (defaults to "master").
    pub environment: String,
    pub access_token: Option<SecretString>,
    pub preview_access_token: Option<SecretString>,
    /// Serve draft content through the preview host.
    pub preview: bool,
    /// Override the API host (e.g. a local mock).
    pub host: Option<String>,
    pub tls: TlsVerification,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            space_id: None,
            environment: DEFAULT_ENVIRONMENT.into(),
            access_token: None,
            preview_access_token: None,
            preview: false,
            host: None,
            tls: TlsVerification::default(),
            timeout: None,
        }
    }
}

impl CmsConfig {
    /// Names of required settings that are absent or blank.
    pub fn missing_required(&self) -> Vec<String> {
        let mut missing = Vec::new();
        if self.space_id.as_deref().is_none_or(|s| s.trim().is_empty()) {
            missing.push("CONTENTFUL_SPACE_ID".to_owned());
        }
        if self.active_token().is_none() {
            missing.push(if self.preview {
                "CONTENTFUL_PREVIEW_ACCESS_TOKEN".to_owned()
            } else {
                "CONTENTFUL_ACCESS_TOKEN".to_owned()
            });
        }
        missing
    }

    /// The token matching the current mode.
    pub fn active_token(&self) -> Option<&SecretString> {
        if self.preview {
            self.preview_access_token.as_ref()
        } else {
            self.access_token.as_ref()
        }
    }

    /// The API host, honoring overrides and preview mode.
    pub fn effective_host(&self) -> &str {
        match (&self.host, self.preview) {
            (Some(host), _) => host,
            (None, true) => lectern_api::PREVIEW_HOST,
            (None, false) => lectern_api::DELIVERY_HOST,
        }
    }
}
