//! Feedback submissions and feedback-status lookups

use crate::value_objects::{DocLevel, Rating};
use serde::{Deserialize, Serialize};

/// `POST /feedback` body (document-level feedback)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileFeedback {
    pub user_id: String,
    pub path: String,
    pub level: DocLevel,
    pub rating: Rating,
    pub feedback: String,
}

/// `POST /section-feedback` body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionFeedback {
    pub user_id: String,
    pub documentation_id: i64,
    pub section_id: i64,
    pub rating: Rating,
    pub feedback: Option<String>,
}

/// `GET /feedback-status-level` payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct FeedbackStatus {
    pub has_feedback: bool,
}

/// `GET /feedback-status` payload: sections already rated by the user
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SectionFeedbackStatus {
    #[serde(default)]
    pub section_ids: Vec<i64>,
}

impl SectionFeedbackStatus {
    pub fn has_feedback(&self, section_id: i64) -> bool {
        self.section_ids.contains(&section_id)
    }
}
