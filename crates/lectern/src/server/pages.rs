// ── Server-rendered pages ──
//
// Plain semantic HTML for chapters and lessons. Rich text goes through
// `lectern_core::render`; everything else is escaped here.

use std::fmt::Write;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use tracing::error;

use lectern_core::render::{document_to_html, escape_html};
use lectern_core::{Chapter, CoreError, EntryRef, Lesson};

use super::state::AppState;

// ── Handlers ────────────────────────────────────────────────────────

/// `GET /chapter/{slug}`
pub async fn chapter(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    match state.service.chapter_by_slug(&slug).await {
        Ok(Some(chapter)) => Html(chapter_page(&chapter)).into_response(),
        Ok(None) => not_found("Chapter"),
        Err(e) => failure(&e),
    }
}

/// `GET /lesson/{slug}`
pub async fn lesson(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    match state.service.lesson_by_slug(&slug).await {
        Ok(Some(lesson)) => Html(lesson_page(&lesson)).into_response(),
        Ok(None) => not_found("Lesson"),
        Err(e) => failure(&e),
    }
}

fn not_found(kind: &str) -> Response {
    let body = layout(
        "Not found",
        &format!("<h1>{kind} not found</h1><p><a href=\"/\">Back to the start</a></p>"),
    );
    (StatusCode::NOT_FOUND, Html(body)).into_response()
}

fn failure(err: &CoreError) -> Response {
    if err.is_not_found() {
        return not_found("Page");
    }
    error!(error = %err, "page render failed");
    let body = layout(
        "Something went wrong",
        &format!(
            "<h1>Something went wrong</h1><pre>{}</pre>",
            escape_html(&err.to_string())
        ),
    );
    (StatusCode::INTERNAL_SERVER_ERROR, Html(body)).into_response()
}

// ── Templates ───────────────────────────────────────────────────────

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n</head>\n<body>\n<main>\n{body}\n</main>\n</body>\n</html>\n",
        escape_html(title)
    )
}

/// Link to `/{kind}/{slug}` when the reference has a slug, else its label.
fn ref_html(kind: &str, r: &EntryRef) -> Option<String> {
    let label = escape_html(r.label()?);
    Some(match r.slug.as_deref() {
        Some(slug) => format!("<a href=\"/{kind}/{}\">{label}</a>", escape_html(slug)),
        None => label,
    })
}

pub(crate) fn chapter_page(chapter: &Chapter) -> String {
    let mut body = String::new();
    let _ = write!(body, "<article class=\"chapter\">\n<h1>{}</h1>\n", escape_html(&chapter.title));

    if let Some(course) = chapter.course.as_ref().and_then(|c| ref_html("course", c)) {
        let _ = writeln!(body, "<p class=\"course\">{course}</p>");
    }
    if let Some(ref description) = chapter.description {
        let _ = writeln!(body, "<p class=\"description\">{}</p>", escape_html(description));
    }
    if let Some(ref content) = chapter.content {
        let _ = writeln!(body, "<section class=\"content\">{}</section>", document_to_html(content));
    }

    let items: Vec<String> = chapter
        .lessons
        .iter()
        .filter_map(|l| ref_html("lesson", l))
        .collect();
    if !items.is_empty() {
        body.push_str("<ol class=\"lessons\">\n");
        for item in items {
            let _ = writeln!(body, "<li>{item}</li>");
        }
        body.push_str("</ol>\n");
    }
    body.push_str("</article>");

    layout(&chapter.title, &body)
}

pub(crate) fn lesson_page(lesson: &Lesson) -> String {
    let mut body = String::new();
    let _ = write!(body, "<article class=\"lesson\">\n<h1>{}</h1>\n", escape_html(&lesson.title));

    if let Some(chapter) = lesson.chapter.as_ref().and_then(|c| ref_html("chapter", c)) {
        let _ = writeln!(body, "<nav class=\"breadcrumb\">{chapter}</nav>");
    }

    let context: Vec<String> = [&lesson.program, &lesson.course]
        .into_iter()
        .flatten()
        .filter_map(|r| r.label().map(escape_html))
        .collect();
    if !context.is_empty() {
        let _ = writeln!(body, "<p class=\"context\">{}</p>", context.join(" / "));
    }

    match lesson.content {
        Some(ref content) => {
            let _ = writeln!(body, "<section class=\"content\">{}</section>", document_to_html(content));
        }
        None => body.push_str("<p class=\"empty\">This lesson has no content yet.</p>\n"),
    }
    if let Some(updated) = lesson.updated_at {
        let _ = writeln!(
            body,
            "<footer>Updated <time datetime=\"{}\">{}</time></footer>",
            updated.to_rfc3339(),
            updated.format("%Y-%m-%d")
        );
    }
    body.push_str("</article>");

    layout(&lesson.title, &body)
}
