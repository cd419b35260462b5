// ── References to other entries ──

use serde::{Deserialize, Serialize};

/// A field that names another entry.
///
/// The CMS may hold either a plain string (a title typed in by an editor)
/// or a link to another entry. Links resolved from `includes` carry the
/// target's id, title, and slug; dangling links keep only the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryRef {
    pub id: Option<String>,
    pub title: Option<String>,
    pub slug: Option<String>,
}

impl EntryRef {
    /// A reference given as free text.
    pub fn named(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: Some(title.into()),
            slug: None,
        }
    }

    /// Display label: the title, falling back to the slug.
    pub fn label(&self) -> Option<&str> {
        self.title.as_deref().or(self.slug.as_deref())
    }
}
