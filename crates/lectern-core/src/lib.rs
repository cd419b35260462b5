//! Content layer between `lectern-api` and the site (server and CLI).
//!
//! This crate owns the domain model and the stateful pieces of the site:
//!
//! - **[`ContentService`]**: facade over a [`ContentSource`] that counts
//!   every outbound request and validates raw entries into typed records
//!   ([`Lesson`], [`Chapter`], [`QuizSummary`]).
//!
//! - **[`CallTracker`]**: process-scoped counter of CMS requests. Created
//!   once with the application state and injected wherever requests are
//!   made.
//!
//! - **[`ResponseCache`]**: tagged, time-bounded cache of response bodies,
//!   invalidated per tag or wholesale.
//!
//! - **[`convert`]**: schema validation at the CMS boundary. Produces a
//!   typed record or a [`ValidationError`] naming the offending field.
//!
//! - **[`render`]**: rich-text documents to escaped HTML.

pub mod cache;
pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod render;
pub mod service;
pub mod source;
pub mod tracker;

// ── Primary re-exports ──────────────────────────────────────────────
pub use cache::ResponseCache;
pub use config::{CmsConfig, DEFAULT_ENVIRONMENT, TlsVerification};
pub use convert::ValidationError;
pub use error::CoreError;
pub use service::ContentService;
pub use source::{ContentSource, Unconfigured, connect};
pub use tracker::CallTracker;

pub use model::{Chapter, ContentType, EntryRef, Lesson, LessonMeta, QuizSummary};

// Wire types callers need alongside the service.
pub use lectern_api::{Document, EntryCollection, EntryQuery, RawEntry};
