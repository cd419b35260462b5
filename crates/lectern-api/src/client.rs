// Async HTTP client for the content delivery API.
//
// Base path: {host}/spaces/{space}/environments/{environment}/
// Auth: `Authorization: Bearer <token>` header

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::query::EntryQuery;
use crate::transport::TransportConfig;
use crate::types::{EntryCollection, ErrorResponse, RawEntry};

/// Published-content host.
pub const DELIVERY_HOST: &str = "https://cdn.contentful.com";
/// Draft-content host, used with a preview token.
pub const PREVIEW_HOST: &str = "https://preview.contentful.com";

/// Response header carrying the seconds until the rate limit resets.
const RATE_LIMIT_RESET: &str = "X-Contentful-RateLimit-Reset";

// ── Client ───────────────────────────────────────────────────────────

/// Async client for one space/environment of the delivery API.
///
/// Stateless apart from the pooled `reqwest::Client`; bound once at
/// startup and shared behind an `Arc`.
pub struct DeliveryClient {
    http: reqwest::Client,
    base_url: Url,
}

impl DeliveryClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from an access token and transport config.
    ///
    /// Injects the bearer token as a default header on every request.
    pub fn from_token(
        host: &str,
        space_id: &str,
        environment: &str,
        token: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
            .map_err(|e| Error::InvalidTokenHeader {
                message: e.to_string(),
            })?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let http = transport.build_client(headers)?;
        let base_url = Self::normalize_base_url(host, space_id, environment)?;

        Ok(Self { http, base_url })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(
        host: &str,
        space_id: &str,
        environment: &str,
        http: reqwest::Client,
    ) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(host, space_id, environment)?;
        Ok(Self { http, base_url })
    }

    /// `{host}/spaces/{space}/environments/{environment}/`
    fn normalize_base_url(host: &str, space_id: &str, environment: &str) -> Result<Url, Error> {
        let mut url = Url::parse(host)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!(
            "{path}/spaces/{space_id}/environments/{environment}/"
        ));
        Ok(url)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get_with_params<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url} params={params:?}");

        let resp = self.http.get(url).query(params).send().await?;
        self.handle_response(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn parse_error(&self, status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Error::InvalidAccessToken;
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let reset_secs = resp
                .headers()
                .get(RATE_LIMIT_RESET)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Error::RateLimited { reset_secs };
        }

        let raw = resp.text().await.unwrap_or_default();

        if let Ok(err) = serde_json::from_str::<ErrorResponse>(&raw) {
            Error::Cms {
                status: status.as_u16(),
                id: err.sys.and_then(|s| s.id),
                message: err.message.unwrap_or_else(|| status.to_string()),
                request_id: err.request_id,
            }
        } else {
            Error::Cms {
                status: status.as_u16(),
                id: None,
                message: if raw.is_empty() {
                    status.to_string()
                } else {
                    raw
                },
                request_id: None,
            }
        }
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// Query entries of one content type.
    ///
    /// An empty `items` list is a successful response; callers decide
    /// whether that means "not found".
    pub async fn entries(
        &self,
        content_type: &str,
        query: &EntryQuery,
    ) -> Result<EntryCollection, Error> {
        self.get_with_params("entries", &query.to_params(content_type))
            .await
    }

    /// Fetch a single entry by id.
    pub async fn entry(&self, id: &str) -> Result<RawEntry, Error> {
        self.get_with_params(&format!("entries/{id}"), &[]).await
    }
}
