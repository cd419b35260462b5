// ── Content type identifiers ──

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Content types the site knows how to query.
///
/// The string form is the CMS content type id (e.g. `"lesson"`).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[strum(serialize_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum ContentType {
    Lesson,
    Chapter,
    Course,
    Program,
    Module,
    Quiz,
}

impl ContentType {
    pub fn id(self) -> &'static str {
        match self {
            Self::Lesson => "lesson",
            Self::Chapter => "chapter",
            Self::Course => "course",
            Self::Program => "program",
            Self::Module => "module",
            Self::Quiz => "quiz",
        }
    }
}
