// ── Content service ──
//
// Facade over a `ContentSource`. Counts every outbound request on the
// shared `CallTracker` and turns raw pages into validated records.

use std::sync::Arc;

use tracing::{debug, warn};

use lectern_api::{EntryCollection, EntryQuery, RawEntry};

use crate::convert;
use crate::error::CoreError;
use crate::model::{Chapter, ContentType, Lesson, QuizSummary};
use crate::source::ContentSource;
use crate::tracker::CallTracker;

/// Link depth used for singular lookups: parents and their titles.
const LOOKUP_INCLUDE_DEPTH: u8 = 2;

/// Upper bound the CMS accepts for one page.
const MAX_PAGE_SIZE: u32 = 1000;

/// Typed, counted access to course content.
///
/// Cheap to clone; clones share the source and the tracker.
#[derive(Clone)]
pub struct ContentService {
    source: Arc<dyn ContentSource>,
    tracker: CallTracker,
}

impl ContentService {
    pub fn new(source: Arc<dyn ContentSource>, tracker: CallTracker) -> Self {
        Self { source, tracker }
    }

    pub fn tracker(&self) -> &CallTracker {
        &self.tracker
    }

    // ── Raw access ──────────────────────────────────────────────────

    /// Entries of `content_type` matching `query`, unvalidated.
    pub async fn entries(
        &self,
        content_type: &str,
        query: &EntryQuery,
    ) -> Result<EntryCollection, CoreError> {
        self.count_request();
        debug!(content_type, calls = self.tracker.count(), "fetching entries");
        self.source.entries(content_type, query).await
    }

    pub async fn entry(&self, id: &str) -> Result<RawEntry, CoreError> {
        self.count_request();
        debug!(id, calls = self.tracker.count(), "fetching entry");
        self.source.entry(id).await
    }

    /// Only sources that reach the CMS count as outbound calls.
    fn count_request(&self) {
        if self.source.sends_requests() {
            self.tracker.increment();
        }
    }

    // ── Typed lookups ───────────────────────────────────────────────

    /// First page item with `fields.slug == slug`, if any.
    async fn by_slug(
        &self,
        content_type: ContentType,
        slug: &str,
    ) -> Result<Option<(RawEntry, EntryCollection)>, CoreError> {
        let query = EntryQuery::new()
            .field_eq("slug", slug)
            .limit(1)
            .include(LOOKUP_INCLUDE_DEPTH);
        let mut page = self.entries(content_type.id(), &query).await?;
        if page.items.is_empty() {
            return Ok(None);
        }
        let first = page.items.swap_remove(0);
        Ok(Some((first, page)))
    }

    /// The lesson with this slug. `None` when no entry matches.
    pub async fn lesson_by_slug(&self, slug: &str) -> Result<Option<Lesson>, CoreError> {
        match self.by_slug(ContentType::Lesson, slug).await? {
            Some((entry, page)) => Ok(Some(convert::to_lesson(&entry, &page)?)),
            None => Ok(None),
        }
    }

    /// The chapter with this slug, its lesson links resolved.
    pub async fn chapter_by_slug(&self, slug: &str) -> Result<Option<Chapter>, CoreError> {
        match self.by_slug(ContentType::Chapter, slug).await? {
            Some((entry, page)) => Ok(Some(convert::to_chapter(&entry, &page)?)),
            None => Ok(None),
        }
    }

    /// Every quiz, in CMS order. Malformed entries are skipped with a warning.
    pub async fn quizzes(&self) -> Result<Vec<QuizSummary>, CoreError> {
        let query = EntryQuery::new().limit(MAX_PAGE_SIZE);
        let page = self.entries(ContentType::Quiz.id(), &query).await?;

        let quizzes = page
            .items
            .iter()
            .filter_map(|entry| match convert::to_quiz_summary(entry, &page) {
                Ok(quiz) => Some(quiz),
                Err(e) => {
                    warn!(error = %e, "skipping malformed quiz");
                    None
                }
            })
            .collect();
        Ok(quizzes)
    }
}
