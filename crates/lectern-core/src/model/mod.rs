// ── Domain model ──
//
// Typed course records produced from validated CMS entries.

pub mod chapter;
pub mod content_type;
pub mod entry_ref;
pub mod lesson;
pub mod quiz;

pub use chapter::Chapter;
pub use content_type::ContentType;
pub use entry_ref::EntryRef;
pub use lesson::{Lesson, LessonMeta};
pub use quiz::QuizSummary;
