// ── Lesson domain type ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lectern_api::Document;

use super::entry_ref::EntryRef;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub course: Option<EntryRef>,
    pub program: Option<EntryRef>,
    /// Parent chapter, when the lesson links back to one.
    pub chapter: Option<EntryRef>,
    /// Rich-text body.
    pub content: Option<Document>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Response body of the lesson metadata endpoint.
///
/// Optional fields serialize as `null` rather than being omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonMeta {
    pub title: String,
    pub slug: String,
    pub course: Option<String>,
    pub program: Option<String>,
    pub content: Option<Document>,
}

impl From<Lesson> for LessonMeta {
    fn from(lesson: Lesson) -> Self {
        Self {
            title: lesson.title,
            slug: lesson.slug,
            course: lesson.course.and_then(|c| c.label().map(str::to_owned)),
            program: lesson.program.and_then(|p| p.label().map(str::to_owned)),
            content: lesson.content,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn meta_serializes_missing_fields_as_null() {
        let lesson = Lesson {
            id: "l1".into(),
            title: "Intro to Git".into(),
            slug: "intro-to-git".into(),
            course: None,
            program: None,
            chapter: None,
            content: None,
            updated_at: None,
        };
        let body = serde_json::to_value(LessonMeta::from(lesson)).unwrap();
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

    #[test]
    fn meta_uses_reference_labels() {
        let lesson = Lesson {
            id: "l1".into(),
            title: "Branches".into(),
            slug: "branches".into(),
            course: Some(EntryRef {
                id: Some("c1".into()),
                title: None,
                slug: Some("git-basics".into()),
            }),
            program: Some(EntryRef::named("Developer Tools")),
            chapter: None,
            content: None,
            updated_at: None,
        };
        let meta = LessonMeta::from(lesson);
        assert_eq!(meta.course.as_deref(), Some("git-basics"));
        assert_eq!(meta.program.as_deref(), Some("Developer Tools"));
    }
}
