//! Shared configuration for the lectern server and CLI.
//!
//! Settings are layered with figment: built-in defaults, then an optional
//! TOML file, then `CONTENTFUL_*` variables for the CMS connection, then
//! `LECTERN_*` variables (nested with `__`, e.g. `LECTERN_SERVER__PORT`).
//! [`Config::cms_config`] translates the result into `lectern_core::CmsConfig`.

use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use lectern_core::{CmsConfig, DEFAULT_ENVIRONMENT, TlsVerification};

/// Default lifetime of the cached quiz listing.
pub const DEFAULT_QUIZZES_TTL_SECS: u64 = 30 * 60;

const REDACTED: &str = "****";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub contentful: ContentfulSettings,

    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub cache: CacheSettings,
}

/// CMS connection settings (`[contentful]`, or `CONTENTFUL_*`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ContentfulSettings {
    #[serde(default, deserialize_with = "lenient_string")]
    pub space_id: Option<String>,

    #[serde(default = "default_environment")]
    pub environment: String,

    /// Delivery API token (plaintext; prefer the env var).
    #[serde(default, deserialize_with = "lenient_string")]
    pub access_token: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub preview_access_token: Option<String>,

    /// Read drafts through the preview API.
    #[serde(default)]
    pub preview: bool,

    /// API host override (e.g. "http://localhost:8080").
    pub host: Option<String>,

    /// Path to a custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Request timeout in seconds. Unset means no timeout.
    pub timeout: Option<u64>,
}

impl Default for ContentfulSettings {
    fn default() -> Self {
        Self {
            space_id: None,
            environment: default_environment(),
            access_token: None,
            preview_access_token: None,
            preview: false,
            host: None,
            ca_cert: None,
            timeout: None,
        }
    }
}

fn default_environment() -> String {
    DEFAULT_ENVIRONMENT.into()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: IpAddr,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Shared secret required by `POST /api/revalidate`. Unset disables the check.
    pub revalidate_secret: Option<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
            revalidate_secret: None,
        }
    }
}

fn default_bind() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}
fn default_port() -> u16 {
    3000
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CacheSettings {
    #[serde(default = "default_quizzes_ttl")]
    pub quizzes_ttl_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            quizzes_ttl_secs: default_quizzes_ttl(),
        }
    }
}

fn default_quizzes_ttl() -> u64 {
    DEFAULT_QUIZZES_TTL_SECS
}

impl CacheSettings {
    pub fn quizzes_ttl(&self) -> Duration {
        Duration::from_secs(self.quizzes_ttl_secs)
    }
}

/// Accept numbers where strings are expected.
///
/// Environment values that look numeric are parsed as integers upstream;
/// ids and tokens made only of digits must still land as strings.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Int(i64),
        UInt(u64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Str(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::UInt(n) => n.to_string(),
    }))
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("dev", "lectern", "lectern").map_or_else(
        || PathBuf::from("lectern.toml"),
        |dirs| dirs.config_dir().join("lectern.toml"),
    )
}

// ── Config loading ──────────────────────────────────────────────────

/// The provider stack, with the TOML layer read from `path`.
pub fn figment(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("CONTENTFUL_").map(|key| format!("contentful.{key}").into()))
        .merge(Env::prefixed("LECTERN_").split("__"))
}

/// Load configuration from `path` (or the platform default) plus environment.
///
/// A missing file is not an error; defaults and environment still apply.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path.map_or_else(config_path, Path::to_path_buf);
    let config: Config = figment(&path).extract()?;
    config.validate()?;
    Ok(config)
}

impl Config {
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref host) = self.contentful.host {
            url::Url::parse(host).map_err(|e| ConfigError::Validation {
                field: "contentful.host".into(),
                reason: format!("invalid URL '{host}': {e}"),
            })?;
        }
        if self.contentful.environment.trim().is_empty() {
            return Err(ConfigError::Validation {
                field: "contentful.environment".into(),
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }

    /// Build the runtime CMS settings. Blank secrets count as absent.
    pub fn cms_config(&self) -> CmsConfig {
        let c = &self.contentful;
        let secret = |s: &Option<String>| {
            s.as_deref()
                .filter(|v| !v.trim().is_empty())
                .map(|v| SecretString::from(v.to_owned()))
        };

        CmsConfig {
            space_id: c.space_id.clone(),
            environment: c.environment.clone(),
            access_token: secret(&c.access_token),
            preview_access_token: secret(&c.preview_access_token),
            preview: c.preview,
            host: c.host.clone(),
            tls: c
                .ca_cert
                .clone()
                .map_or(TlsVerification::SystemDefaults, TlsVerification::CustomCa),
            timeout: c.timeout.map(Duration::from_secs),
        }
    }

    /// Copy with every secret masked, for display.
    pub fn redacted(&self) -> Self {
        let mask = |s: &Option<String>| s.as_ref().map(|_| REDACTED.to_owned());
        let mut out = self.clone();
        out.contentful.access_token = mask(&self.contentful.access_token);
        out.contentful.preview_access_token = mask(&self.contentful.preview_access_token);
        out.server.revalidate_secret = mask(&self.server.revalidate_secret);
        out
    }

    /// Pretty TOML rendering.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use figment::Jail;
    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;

    fn load_in(jail: &Jail) -> figment::error::Result<Config> {
        load_config(Some(&jail.directory().join("lectern.toml"))).map_err(|e| e.to_string().into())
    }

    #[test]
    fn defaults_without_file_or_env() {
        Jail::expect_with(|jail| {
            let cfg = load_in(jail)?;
            assert_eq!(cfg.contentful.environment, "master");
            assert_eq!(cfg.server.port, 3000);
            assert_eq!(cfg.cache.quizzes_ttl(), Duration::from_secs(1800));
            assert!(cfg.cms_config().timeout.is_none());
            Ok(())
        });
    }

    #[test]
    fn contentful_env_vars_fill_cms_settings() {
        Jail::expect_with(|jail| {
            jail.set_env("CONTENTFUL_SPACE_ID", "space1");
            jail.set_env("CONTENTFUL_ACCESS_TOKEN", "delivery");
            jail.set_env("CONTENTFUL_PREVIEW_ACCESS_TOKEN", "draft");
            jail.set_env("CONTENTFUL_ENVIRONMENT", "staging");

            let cms = load_in(jail)?.cms_config();
            assert_eq!(cms.space_id.as_deref(), Some("space1"));
            assert_eq!(cms.environment, "staging");
            assert_eq!(cms.access_token.unwrap().expose_secret(), "delivery");
            assert_eq!(cms.preview_access_token.unwrap().expose_secret(), "draft");
            assert!(!cms.preview);
            Ok(())
        });
    }

    #[test]
    fn numeric_space_id_stays_a_string() {
        Jail::expect_with(|jail| {
            jail.set_env("CONTENTFUL_SPACE_ID", "12345");
            let cfg = load_in(jail)?;
            assert_eq!(cfg.contentful.space_id.as_deref(), Some("12345"));
            Ok(())
        });
    }

    #[test]
    fn env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "lectern.toml",
                r#"
                [contentful]
                space_id = "from-file"
                access_token = "file-token"

                [server]
                port = 4000
                "#,
            )?;
            jail.set_env("CONTENTFUL_SPACE_ID", "from-env");
            jail.set_env("LECTERN_SERVER__PORT", "5000");
            jail.set_env("LECTERN_CACHE__QUIZZES_TTL_SECS", "60");

            let cfg = load_in(jail)?;
            assert_eq!(cfg.contentful.space_id.as_deref(), Some("from-env"));
            assert_eq!(cfg.contentful.access_token.as_deref(), Some("file-token"));
            assert_eq!(cfg.server.port, 5000);
            assert_eq!(cfg.cache.quizzes_ttl_secs, 60);
            Ok(())
        });
    }

    #[test]
    fn invalid_host_is_rejected() {
        Jail::expect_with(|jail| {
            jail.set_env("CONTENTFUL_HOST", "not a url");
            let err = load_config(Some(&jail.directory().join("lectern.toml"))).unwrap_err();
            assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "contentful.host"));
            Ok(())
        });
    }

    #[test]
    fn blank_token_counts_as_missing() {
        let mut cfg = Config::default();
        cfg.contentful.space_id = Some("s".into());
        cfg.contentful.access_token = Some("   ".into());
        assert_eq!(
            cfg.cms_config().missing_required(),
            vec!["CONTENTFUL_ACCESS_TOKEN"]
        );
    }

    #[test]
    fn ca_cert_and_timeout_are_translated() {
        let mut cfg = Config::default();
        cfg.contentful.ca_cert = Some(PathBuf::from("/etc/ssl/corp.pem"));
        cfg.contentful.timeout = Some(10);
        let cms = cfg.cms_config();
        assert_eq!(cms.tls, TlsVerification::CustomCa(PathBuf::from("/etc/ssl/corp.pem")));
        assert_eq!(cms.timeout, Some(Duration::from_secs(10)));
    }

    #[test]
    fn redacted_masks_secrets_only() {
        let mut cfg = Config::default();
        cfg.contentful.space_id = Some("space1".into());
        cfg.contentful.access_token = Some("delivery".into());
        cfg.server.revalidate_secret = Some("hunter2".into());

        let shown = cfg.redacted().to_toml().unwrap();
        assert!(shown.contains("space_id = \"space1\""));
        assert!(shown.contains("access_token = \"****\""));
        assert!(shown.contains("revalidate_secret = \"****\""));
        assert!(!shown.contains("delivery"));
        assert!(!shown.contains("hunter2"));
    }

    #[test]
    fn file_written_by_hand_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            "[server]\nbind = \"0.0.0.0\"\nrevalidate_secret = \"s3\"\n",
        )
        .unwrap();

        let cfg: Config = figment(&path).extract().unwrap();
        assert_eq!(cfg.server.bind, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        assert_eq!(cfg.server.revalidate_secret.as_deref(), Some("s3"));
    }
}
