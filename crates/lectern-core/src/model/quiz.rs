// ── Quiz listing type ──

use serde::{Deserialize, Serialize};

/// One row of the quiz listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSummary {
    pub title: String,
    pub slug: String,
    /// Quiz kind as authored in the CMS (e.g. "multiple-choice").
    #[serde(rename = "type")]
    pub quiz_type: Option<String>,
}
