// ── Entry-to-domain validation ──
//
// Bridges raw `lectern_api` entries into `lectern_core::model` records.
// Every field read goes through `FieldReader`, which either yields a typed
// value or a `ValidationError` naming the entry and field. Linked entries
// are resolved against the collection the entry came from.

use serde_json::Value;
use thiserror::Error;

use lectern_api::{Document, EntryCollection, Link, RawEntry};

use crate::model::{Chapter, ContentType, EntryRef, Lesson, QuizSummary};

// ── Error ───────────────────────────────────────────────────────────

/// An entry did not have the shape its content type promises.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{content_type} entry '{entry_id}': field '{field}' {reason}")]
pub struct ValidationError {
    pub content_type: String,
    pub entry_id: String,
    pub field: String,
    pub reason: String,
}

// ── Field reader ────────────────────────────────────────────────────

/// Typed accessors over one entry's field map.
pub struct FieldReader<'a> {
    entry: &'a RawEntry,
    page: &'a EntryCollection,
    content_type: ContentType,
}

impl<'a> FieldReader<'a> {
    /// Start reading `entry`, checking its declared content type first.
    pub fn new(
        entry: &'a RawEntry,
        page: &'a EntryCollection,
        content_type: ContentType,
    ) -> Result<Self, ValidationError> {
        let reader = Self {
            entry,
            page,
            content_type,
        };
        match entry.content_type() {
            Some(actual) if actual != content_type.id() => {
                Err(reader.invalid("sys.contentType", format!("is '{actual}'")))
            }
            _ => Ok(reader),
        }
    }

    fn invalid(&self, field: &str, reason: impl Into<String>) -> ValidationError {
        ValidationError {
            content_type: self.content_type.to_string(),
            entry_id: self.entry.id().to_owned(),
            field: field.to_owned(),
            reason: reason.into(),
        }
    }

    fn type_mismatch(&self, field: &str, expected: &str, got: &Value) -> ValidationError {
        self.invalid(
            field,
            format!("expected {expected}, got {}", json_kind(got)),
        )
    }

    /// A string that must be present and non-empty.
    pub fn required_str(&self, field: &str) -> Result<String, ValidationError> {
        match self.optional_str(field)? {
            Some(s) if !s.trim().is_empty() => Ok(s),
            Some(_) => Err(self.invalid(field, "is empty")),
            None => Err(self.invalid(field, "is missing")),
        }
    }

    pub fn optional_str(&self, field: &str) -> Result<Option<String>, ValidationError> {
        match self.entry.field(field) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(self.type_mismatch(field, "a string", other)),
        }
    }

    pub fn optional_document(&self, field: &str) -> Result<Option<Document>, ValidationError> {
        self.entry
            .field(field)
            .map(|v| Document::from_value(v).map_err(|reason| self.invalid(field, reason)))
            .transpose()
    }

    /// A reference given either as free text or as an entry link.
    pub fn optional_ref(&self, field: &str) -> Result<Option<EntryRef>, ValidationError> {
        self.entry
            .field(field)
            .map(|v| self.to_ref(field, v))
            .transpose()
    }

    /// A list of references; absent means empty.
    pub fn ref_list(&self, field: &str) -> Result<Vec<EntryRef>, ValidationError> {
        match self.entry.field(field) {
            None => Ok(Vec::new()),
            Some(Value::Array(items)) => items.iter().map(|v| self.to_ref(field, v)).collect(),
            Some(other) => Err(self.type_mismatch(field, "a list", other)),
        }
    }

    fn to_ref(&self, field: &str, value: &Value) -> Result<EntryRef, ValidationError> {
        if let Value::String(s) = value {
            return Ok(EntryRef::named(s.clone()));
        }
        let link = Link::from_value(value)
            .ok_or_else(|| self.type_mismatch(field, "a string or an entry link", value))?;

        let target = self.page.resolve(&link);
        let text = |name: &str| {
            target
                .and_then(|t| t.field(name))
                .and_then(Value::as_str)
                .map(str::to_owned)
        };
        Ok(EntryRef {
            id: Some(link.id().to_owned()),
            title: text("title").or_else(|| text("name")),
            slug: text("slug"),
        })
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

// ── Conversions ─────────────────────────────────────────────────────

pub fn to_lesson(entry: &RawEntry, page: &EntryCollection) -> Result<Lesson, ValidationError> {
    let r = FieldReader::new(entry, page, ContentType::Lesson)?;
    Ok(Lesson {
        id: entry.id().to_owned(),
        title: r.required_str("title")?,
        slug: r.required_str("slug")?,
        course: r.optional_ref("course")?,
        program: r.optional_ref("program")?,
        chapter: r.optional_ref("chapter")?,
        content: r.optional_document("content")?,
        updated_at: entry.sys.updated_at,
    })
}

pub fn to_chapter(entry: &RawEntry, page: &EntryCollection) -> Result<Chapter, ValidationError> {
    let r = FieldReader::new(entry, page, ContentType::Chapter)?;
    Ok(Chapter {
        id: entry.id().to_owned(),
        title: r.required_str("title")?,
        slug: r.required_str("slug")?,
        description: r.optional_str("description")?,
        content: r.optional_document("content")?,
        lessons: r.ref_list("lessons")?,
        course: r.optional_ref("course")?,
    })
}

pub fn to_quiz_summary(
    entry: &RawEntry,
    page: &EntryCollection,
) -> Result<QuizSummary, ValidationError> {
    let r = FieldReader::new(entry, page, ContentType::Quiz)?;
    Ok(QuizSummary {
        title: r.required_str("title")?,
        slug: r.required_str("slug")?,
        quiz_type: r.optional_str("type")?,
    })
}
