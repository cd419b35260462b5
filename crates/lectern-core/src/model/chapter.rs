// ── Chapter domain type ──

use serde::{Deserialize, Serialize};

use lectern_api::Document;

use super::entry_ref::EntryRef;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub content: Option<Document>,
    /// Lessons in display order.
    pub lessons: Vec<EntryRef>,
    pub course: Option<EntryRef>,
}
