#![allow(clippy::unwrap_used)]
// JSON API tests: real server on an ephemeral port, CMS mocked or faked.

mod common;

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use lectern::server::ServerOptions;
use lectern_core::Unconfigured;

use common::{
    ChangingQuizzes, ENTRIES_PATH, FailingSource, entry, page, short_ttl, spawn_app,
    spawn_with_cms, state_with,
};

async fn get_json(url: &str) -> (u16, Value) {
    let resp = reqwest::get(url).await.unwrap();
    let status = resp.status().as_u16();
    (status, resp.json().await.unwrap())
}

// ── Lesson metadata ─────────────────────────────────────────────────

#[tokio::test]
async fn missing_slug_is_400_regardless_of_cms() {
    let state = state_with(
        Arc::new(Unconfigured::new(vec!["CONTENTFUL_SPACE_ID".into()])),
        ServerOptions::default(),
    );
    let base = spawn_app(state.clone()).await;

    for url in [
        format!("{base}/api/lesson-meta"),
        format!("{base}/api/lesson-meta?slug="),
        format!("{base}/api/lesson-meta?slug=%20"),
    ] {
        let (status, body) = get_json(&url).await;
        assert_eq!(status, 400, "{url}");
        assert_eq!(body, json!({ "error": "Missing required parameter: slug" }));
    }
    assert_eq!(state.tracker().count(), 0);
}

#[tokio::test]
async fn unknown_slug_is_404() {
    let (cms, base, _) = spawn_with_cms(ServerOptions::default()).await;

    Mock::given(method("GET"))
        .and(path(ENTRIES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(vec![])))
        .mount(&cms)
        .await;

    for slug in ["does-not-exist", "intro-to-gti", "x"] {
        let (status, body) = get_json(&format!("{base}/api/lesson-meta?slug={slug}")).await;
        assert_eq!(status, 404);
        assert_eq!(body, json!({ "error": "Lesson not found" }));
    }
}

#[tokio::test]
async fn lesson_without_content_has_null_fields() {
    let (cms, base, _) = spawn_with_cms(ServerOptions::default()).await;

    Mock::given(method("GET"))
        .and(path(ENTRIES_PATH))
        .and(query_param("content_type", "lesson"))
        .and(query_param("fields.slug", "intro-to-git"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(vec![entry(
            "l1",
            "lesson",
            json!({ "title": "Intro to Git", "slug": "intro-to-git" }),
        )])))
        .mount(&cms)
        .await;

    let (status, body) = get_json(&format!("{base}/api/lesson-meta?slug=intro-to-git")).await;
    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({
            "title": "Intro to Git",
            "slug": "intro-to-git",
            "course": null,
            "program": null,
            "content": null
        })
    );
}

#[tokio::test]
async fn lesson_content_is_passed_through() {
    let (cms, base, _) = spawn_with_cms(ServerOptions::default()).await;

    let content = json!({
        "nodeType": "document",
        "data": {},
        "content": [{ "nodeType": "paragraph", "data": {}, "content": [
            { "nodeType": "text", "value": "git init", "marks": [], "data": {} }
        ]}]
    });
    Mock::given(method("GET"))
        .and(path(ENTRIES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(vec![entry(
            "l1",
            "lesson",
            json!({ "title": "Init", "slug": "init", "course": "Git Basics", "content": content }),
        )])))
        .mount(&cms)
        .await;

    let (status, body) = get_json(&format!("{base}/api/lesson-meta?slug=init")).await;
    assert_eq!(status, 200);
    assert_eq!(body["course"], "Git Basics");
    assert_eq!(body["content"], content);
}

#[tokio::test]
async fn upstream_error_message_is_passed_through() {
    let state = state_with(Arc::new(FailingSource("ECONNRESET")), ServerOptions::default());
    let base = spawn_app(state).await;

    let (status, body) = get_json(&format!("{base}/api/lesson-meta?slug=intro-to-git")).await;
    assert_eq!(status, 500);
    assert_eq!(body, json!({ "error": "ECONNRESET" }));

    let (status, body) = get_json(&format!("{base}/api/quizzes")).await;
    assert_eq!(status, 500);
    assert_eq!(body, json!({ "error": "ECONNRESET" }));
}

#[tokio::test]
async fn unconfigured_cms_fails_at_request_time() {
    let state = state_with(
        Arc::new(Unconfigured::new(vec!["CONTENTFUL_ACCESS_TOKEN".into()])),
        ServerOptions::default(),
    );
    let base = spawn_app(state.clone()).await;

    let (status, body) = get_json(&format!("{base}/api/lesson-meta?slug=a")).await;
    assert_eq!(status, 500);
    assert_eq!(
        body,
        json!({ "error": "CMS is not configured: missing CONTENTFUL_ACCESS_TOKEN" })
    );
    assert_eq!(state.tracker().count(), 0);
}

#[tokio::test]
async fn malformed_query_string_is_json_400() {
    let state = state_with(Arc::new(ChangingQuizzes::default()), ServerOptions::default());
    let base = spawn_app(state.clone()).await;

    let (status, body) = get_json(&format!("{base}/api/lesson-meta?slug=a&slug=b")).await;
    assert_eq!(status, 400);
    let message = body["error"].as_str().unwrap();
    assert!(message.starts_with("Invalid query string"), "{message}");

    let resp = reqwest::Client::new()
        .post(format!("{base}/api/revalidate?tag=a&tag=b"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    assert!(resp.json::<Value>().await.unwrap()["error"].is_string());
    assert_eq!(state.tracker().count(), 0);
}

// ── Quizzes & caching ───────────────────────────────────────────────

#[tokio::test]
async fn quizzes_shape() {
    let (cms, base, _) = spawn_with_cms(ServerOptions::default()).await;

    Mock::given(method("GET"))
        .and(path(ENTRIES_PATH))
        .and(query_param("content_type", "quiz"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(vec![
            entry("q1", "quiz", json!({ "title": "Git Quiz", "slug": "git-quiz", "type": "multiple-choice" })),
            entry("q2", "quiz", json!({ "title": "Shell Quiz", "slug": "shell-quiz" })),
        ])))
        .expect(1)
        .mount(&cms)
        .await;

    let resp = reqwest::get(format!("{base}/api/quizzes")).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert!(
        resp.headers()["content-type"]
            .to_str()
            .unwrap()
            .contains("application/json")
    );
    assert_eq!(
        resp.json::<Value>().await.unwrap(),
        json!({ "quizzes": [
            { "title": "Git Quiz", "slug": "git-quiz", "type": "multiple-choice" },
            { "title": "Shell Quiz", "slug": "shell-quiz", "type": null }
        ]})
    );
}

#[tokio::test]
async fn quizzes_are_byte_identical_within_window() {
    let source = Arc::new(ChangingQuizzes::default());
    let state = state_with(source.clone(), ServerOptions::default());
    let base = spawn_app(state.clone()).await;

    let first = reqwest::get(format!("{base}/api/quizzes"))
        .await
        .unwrap()
        .bytes()
        .await
        .unwrap();
    for _ in 0..3 {
        let again = reqwest::get(format!("{base}/api/quizzes"))
            .await
            .unwrap()
            .bytes()
            .await
            .unwrap();
        assert_eq!(again, first);
    }
    assert_eq!(state.tracker().count(), 1);
}

#[tokio::test]
async fn concurrent_cold_requests_fetch_once() {
    let state = state_with(Arc::new(ChangingQuizzes::default()), ServerOptions::default());
    let base = spawn_app(state.clone()).await;

    let requests: Vec<_> = (0..8)
        .map(|_| {
            let url = format!("{base}/api/quizzes");
            tokio::spawn(async move { reqwest::get(url).await.unwrap().text().await.unwrap() })
        })
        .collect();
    for request in requests {
        assert!(request.await.unwrap().contains("Git Quiz v0"));
    }
    assert_eq!(state.tracker().count(), 1);
}

#[tokio::test]
async fn quizzes_change_after_window() {
    let state = state_with(Arc::new(ChangingQuizzes::default()), short_ttl());
    let base = spawn_app(state).await;

    let first = reqwest::get(format!("{base}/api/quizzes")).await.unwrap().text().await.unwrap();
    tokio::time::sleep(Duration::from_millis(300)).await;
    let second = reqwest::get(format!("{base}/api/quizzes")).await.unwrap().text().await.unwrap();

    assert!(first.contains("Git Quiz v0"));
    assert!(second.contains("Git Quiz v1"));
}

#[tokio::test]
async fn quizzes_change_after_revalidation() {
    let state = state_with(Arc::new(ChangingQuizzes::default()), ServerOptions::default());
    let base = spawn_app(state.clone()).await;
    let client = reqwest::Client::new();

    let first = reqwest::get(format!("{base}/api/quizzes")).await.unwrap().text().await.unwrap();

    let resp = client
        .post(format!("{base}/api/revalidate?tag=quizzes"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["revalidated"], true);
    assert_eq!(body["tag"], "quizzes");
    assert_eq!(body["entries"], 1);
    assert!(body["now"].as_i64().unwrap() > 0);

    let second = reqwest::get(format!("{base}/api/quizzes")).await.unwrap().text().await.unwrap();
    assert_ne!(first, second);
    assert_eq!(state.tracker().count(), 2);
}

// ── Revalidation ────────────────────────────────────────────────────

#[tokio::test]
async fn revalidate_all_drops_every_cached_response() {
    let state = state_with(Arc::new(ChangingQuizzes::default()), ServerOptions::default());
    let base = spawn_app(state.clone()).await;

    let first = reqwest::get(format!("{base}/api/quizzes")).await.unwrap().text().await.unwrap();
    let resp = reqwest::Client::new()
        .post(format!("{base}/api/revalidate?tag=*"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["tag"], "*");
    assert_eq!(body["entries"], 1);

    let second = reqwest::get(format!("{base}/api/quizzes")).await.unwrap().text().await.unwrap();
    assert_ne!(first, second);
}

#[tokio::test]
async fn revalidate_requires_tag() {
    let state = state_with(Arc::new(ChangingQuizzes::default()), ServerOptions::default());
    let base = spawn_app(state).await;

    let resp = reqwest::Client::new()
        .post(format!("{base}/api/revalidate"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    assert_eq!(
        resp.json::<Value>().await.unwrap(),
        json!({ "error": "Missing required parameter: tag" })
    );
}

#[tokio::test]
async fn revalidate_checks_configured_secret() {
    let options = ServerOptions {
        revalidate_secret: Some("s3cret".into()),
        ..ServerOptions::default()
    };
    let state = state_with(Arc::new(ChangingQuizzes::default()), options);
    let base = spawn_app(state).await;
    let client = reqwest::Client::new();

    for url in [
        format!("{base}/api/revalidate?tag=quizzes"),
        format!("{base}/api/revalidate?tag=quizzes&secret=wrong"),
    ] {
        let resp = client.post(&url).send().await.unwrap();
        assert_eq!(resp.status(), 401, "{url}");
    }

    let resp = client
        .post(format!("{base}/api/revalidate?tag=quizzes&secret=s3cret"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}

// ── Diagnostics ─────────────────────────────────────────────────────

#[tokio::test]
async fn usage_reports_outbound_calls() {
    let state = state_with(Arc::new(ChangingQuizzes::default()), ServerOptions::default());
    let base = spawn_app(state).await;

    let (_, body) = get_json(&format!("{base}/api/usage")).await;
    assert_eq!(body, json!({ "calls": 0 }));

    get_json(&format!("{base}/api/quizzes")).await;
    get_json(&format!("{base}/api/quizzes")).await;
    get_json(&format!("{base}/api/lesson-meta")).await;

    let (_, body) = get_json(&format!("{base}/api/usage")).await;
    assert_eq!(body, json!({ "calls": 1 }));
}

#[tokio::test]
async fn health_and_unknown_routes() {
    let state = state_with(Arc::new(ChangingQuizzes::default()), ServerOptions::default());
    let base = spawn_app(state).await;

    let (status, body) = get_json(&format!("{base}/health")).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({ "status": "ok" }));

    let resp = reqwest::get(format!("{base}/api/nope")).await.unwrap();
    assert_eq!(resp.status(), 404);
}
