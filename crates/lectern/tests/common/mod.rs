#![allow(clippy::unwrap_used, dead_code)]
// Shared fixtures for the server integration tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};
use wiremock::MockServer;

use lectern::server::{AppState, ServerOptions, build_router};
use lectern_core::{
    CallTracker, ContentService, ContentSource, CoreError, EntryCollection, EntryQuery, RawEntry,
};

pub const ENTRIES_PATH: &str = "/spaces/space1/environments/master/entries";

/// Serve `state` on an OS-assigned port and return the base URL.
pub async fn spawn_app(state: AppState) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, build_router(state)).await.unwrap();
    });
    format!("http://{addr}")
}

pub fn state_with(source: Arc<dyn ContentSource>, options: ServerOptions) -> AppState {
    AppState::new(ContentService::new(source, CallTracker::new()), options)
}

/// App backed by a wiremock CMS.
pub async fn spawn_with_cms(options: ServerOptions) -> (MockServer, String, AppState) {
    let cms = MockServer::start().await;
    let client = lectern_api::DeliveryClient::from_reqwest(
        &cms.uri(),
        "space1",
        "master",
        reqwest::Client::new(),
    )
    .unwrap();
    let state = state_with(Arc::new(client), options);
    let base = spawn_app(state.clone()).await;
    (cms, base, state)
}

pub fn entry(id: &str, content_type: &str, fields: Value) -> Value {
    json!({
        "sys": {
            "id": id,
            "type": "Entry",
            "contentType": { "sys": { "type": "Link", "linkType": "ContentType", "id": content_type } }
        },
        "fields": fields
    })
}

pub fn page(items: Vec<Value>) -> Value {
    json!({ "sys": { "type": "Array" }, "total": items.len(), "skip": 0, "limit": 100, "items": items })
}

pub fn short_ttl() -> ServerOptions {
    ServerOptions {
        quizzes_ttl: Duration::from_millis(200),
        revalidate_secret: None,
    }
}

// ── Fake sources ────────────────────────────────────────────────────

/// Fails every request with a fixed upstream message.
pub struct FailingSource(pub &'static str);

#[async_trait]
impl ContentSource for FailingSource {
    async fn entries(&self, _: &str, _: &EntryQuery) -> Result<EntryCollection, CoreError> {
        Err(CoreError::Upstream {
            message: self.0.to_owned(),
            status: None,
        })
    }

    async fn entry(&self, _: &str) -> Result<RawEntry, CoreError> {
        Err(CoreError::Upstream {
            message: self.0.to_owned(),
            status: None,
        })
    }
}

/// Returns a single quiz whose title changes on every fetch.
#[derive(Default)]
pub struct ChangingQuizzes {
    pub fetches: AtomicUsize,
}

#[async_trait]
impl ContentSource for ChangingQuizzes {
    async fn entries(&self, _: &str, _: &EntryQuery) -> Result<EntryCollection, CoreError> {
        let n = self.fetches.fetch_add(1, Ordering::SeqCst);
        let body = page(vec![entry(
            "q1",
            "quiz",
            json!({ "title": format!("Git Quiz v{n}"), "slug": "git-quiz", "type": "multiple-choice" }),
        )]);
        Ok(serde_json::from_value(body).unwrap())
    }

    async fn entry(&self, id: &str) -> Result<RawEntry, CoreError> {
        Err(CoreError::NotFound {
            entity_type: "entry".into(),
            identifier: id.to_owned(),
        })
    }
}
