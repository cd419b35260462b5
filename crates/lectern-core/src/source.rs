// ── Content sources ──
//
// `ContentSource` is the seam between the content service and the CMS.
// Production code talks to the delivery API; tests substitute fakes.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use lectern_api::{DeliveryClient, EntryCollection, EntryQuery, RawEntry, TlsMode, TransportConfig};

use crate::config::{CmsConfig, TlsVerification};
use crate::error::CoreError;

/// Read access to CMS entries.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Entries of one content type matching `query`. No match is an empty page.
    async fn entries(
        &self,
        content_type: &str,
        query: &EntryQuery,
    ) -> Result<EntryCollection, CoreError>;

    /// A single entry by id.
    async fn entry(&self, id: &str) -> Result<RawEntry, CoreError>;

    /// Whether calls leave the process. Sources that fail locally return
    /// `false` and are not counted by the call tracker.
    fn sends_requests(&self) -> bool {
        true
    }
}

#[async_trait]
impl ContentSource for DeliveryClient {
    async fn entries(
        &self,
        content_type: &str,
        query: &EntryQuery,
    ) -> Result<EntryCollection, CoreError> {
        Ok(DeliveryClient::entries(self, content_type, query).await?)
    }

    async fn entry(&self, id: &str) -> Result<RawEntry, CoreError> {
        match DeliveryClient::entry(self, id).await {
            Ok(entry) => Ok(entry),
            Err(e) if e.is_not_found() => Err(CoreError::NotFound {
                entity_type: "entry".into(),
                identifier: id.to_owned(),
            }),
            Err(e) => Err(e.into()),
        }
    }
}

// ── Unconfigured ────────────────────────────────────────────────────

/// Stand-in used when required settings are missing.
///
/// Every call fails with [`CoreError::NotConfigured`].
#[derive(Debug, Clone)]
pub struct Unconfigured {
    missing: Vec<String>,
}

impl Unconfigured {
    pub fn new(missing: Vec<String>) -> Self {
        Self { missing }
    }

    fn error(&self) -> CoreError {
        CoreError::NotConfigured {
            missing: self.missing.clone(),
        }
    }
}

#[async_trait]
impl ContentSource for Unconfigured {
    async fn entries(&self, _: &str, _: &EntryQuery) -> Result<EntryCollection, CoreError> {
        Err(self.error())
    }

    async fn entry(&self, _: &str) -> Result<RawEntry, CoreError> {
        Err(self.error())
    }

    fn sends_requests(&self) -> bool {
        false
    }
}

// ── Construction ────────────────────────────────────────────────────

/// Build the content source described by `config`.
///
/// Missing credentials are not fatal: a warning is logged and the returned
/// source fails on first use. Malformed settings (bad host URL, unreadable
/// CA file) are reported immediately.
pub fn connect(config: &CmsConfig) -> Result<Arc<dyn ContentSource>, CoreError> {
    let missing = config.missing_required();
    let (Some(space_id), Some(token), true) = (
        config.space_id.as_deref(),
        config.active_token(),
        missing.is_empty(),
    ) else {
        warn!(
            missing = %missing.join(", "),
            "CMS credentials are incomplete; content requests will fail"
        );
        return Ok(Arc::new(Unconfigured::new(missing)));
    };

    let transport = TransportConfig {
        tls: match &config.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        },
        timeout: config.timeout,
    };

    let host = config.effective_host();
    let client =
        DeliveryClient::from_token(host, space_id, &config.environment, token, &transport)?;

    info!(
        host,
        space = space_id,
        environment = %config.environment,
        preview = config.preview,
        "CMS client ready"
    );
    Ok(Arc::new(client))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    #[tokio::test]
    async fn missing_credentials_fail_lazily() {
        let source = connect(&CmsConfig::default()).unwrap();
        let err = source
            .entries("lesson", &EntryQuery::new())
            .await
            .unwrap_err();
        match err {
            CoreError::NotConfigured { missing } => {
                assert_eq!(missing, vec!["CONTENTFUL_SPACE_ID", "CONTENTFUL_ACCESS_TOKEN"]);
            }
            other => panic!("expected NotConfigured, got {other:?}"),
        }
    }

    #[test]
    fn bad_host_is_reported_up_front() {
        let config = CmsConfig {
            space_id: Some("s".into()),
            access_token: Some(SecretString::from("t".to_owned())),
            host: Some("not a url".into()),
            ..CmsConfig::default()
        };
        let err = connect(&config).err().unwrap();
        assert!(matches!(err, CoreError::Config { .. }), "got {err:?}");
    }
}
