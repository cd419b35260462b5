// ── JSON API handlers ──

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::header,
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::info;

use lectern_core::{LessonMeta, QuizSummary};

use super::error::ApiError;
use super::state::AppState;

/// Cache key and invalidation tag of the quiz listing.
pub const QUIZZES_TAG: &str = "quizzes";

/// Revalidation tag that drops every cached response.
pub const ALL_TAGS: &str = "*";

// ── Lesson metadata ─────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SlugParams {
    slug: Option<String>,
}

/// `GET /api/lesson-meta?slug=`
pub async fn lesson_meta(
    State(state): State<AppState>,
    query: Result<Query<SlugParams>, QueryRejection>,
) -> Result<Json<LessonMeta>, ApiError> {
    let Query(params) = query?;
    let slug = params
        .slug
        .filter(|s| !s.trim().is_empty())
        .ok_or(ApiError::MissingParam("slug"))?;

    let lesson = state
        .service
        .lesson_by_slug(&slug)
        .await?
        .ok_or_else(|| ApiError::NotFound("Lesson not found".into()))?;

    Ok(Json(LessonMeta::from(lesson)))
}

// ── Quizzes ─────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct QuizList {
    quizzes: Vec<QuizSummary>,
}

/// `GET /api/quizzes`, served from the response cache.
pub async fn quizzes(State(state): State<AppState>) -> Result<Response, ApiError> {
    let ttl = state.options.quizzes_ttl;
    let service = state.service.clone();

    let body = state
        .cache
        .get_or_try_insert(QUIZZES_TAG, &[QUIZZES_TAG], ttl, || async move {
            let quizzes = service.quizzes().await?;
            let encoded = serde_json::to_vec(&QuizList { quizzes })?;
            Ok::<_, ApiError>(Bytes::from(encoded))
        })
        .await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_owned()),
            (header::CACHE_CONTROL, format!("public, max-age={}", ttl.as_secs())),
        ],
        body,
    )
        .into_response())
}

// ── Revalidation ────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RevalidateParams {
    tag: Option<String>,
    secret: Option<String>,
}

/// `POST /api/revalidate?tag=&secret=`: drop cached responses carrying `tag`,
/// or everything for `tag=*`.
pub async fn revalidate(
    State(state): State<AppState>,
    query: Result<Query<RevalidateParams>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(params) = query?;
    if let Some(expected) = state.options.revalidate_secret.as_deref() {
        if params.secret.as_deref() != Some(expected) {
            return Err(ApiError::Unauthorized);
        }
    }

    let tag = params
        .tag
        .filter(|t| !t.trim().is_empty())
        .ok_or(ApiError::MissingParam("tag"))?;

    let entries = if tag == ALL_TAGS {
        state.cache.invalidate_all()
    } else {
        state.cache.invalidate_tag(&tag)
    };
    info!(tag, entries, "revalidated");

    Ok(Json(json!({
        "revalidated": true,
        "tag": tag,
        "entries": entries,
        "now": chrono::Utc::now().timestamp_millis(),
    })))
}

// ── Diagnostics ─────────────────────────────────────────────────────

/// `GET /api/usage`: outbound CMS requests since startup.
pub async fn usage(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "calls": state.tracker().count() }))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
