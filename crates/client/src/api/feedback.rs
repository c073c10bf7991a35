use super::MessageResponse;
use crate::client::ApiClient;
use common::InsightResult;
use domain::entities::{FeedbackStatus, FileFeedback, SectionFeedback, SectionFeedbackStatus};
use domain::DocLevel;
use tracing::info;

impl ApiClient {
    pub async fn submit_file_feedback(&self, feedback: &FileFeedback) -> InsightResult<()> {
        let _: MessageResponse = self
            .post_json(&["feedback"], feedback, "Failed to submit feedback")
            .await?;
        info!(path = %feedback.path, level = %feedback.level, "Feedback submitted");
        Ok(())
    }

    pub async fn submit_section_feedback(&self, feedback: &SectionFeedback) -> InsightResult<()> {
        let _: MessageResponse = self
            .post_json(
                &["section-feedback"],
                feedback,
                "Failed to submit section feedback",
            )
            .await?;
        info!(section_id = feedback.section_id, "Section feedback submitted");
        Ok(())
    }

    /// Whether `user_id` already rated the document at `path`
    pub async fn feedback_status_level(
        &self,
        user_id: &str,
        path: &str,
        level: DocLevel,
    ) -> InsightResult<bool> {
        let status: FeedbackStatus = self
            .get_json(
                &["feedback-status-level"],
                &[("user_id", user_id), ("path", path), ("level", level.as_str())],
                "Failed to fetch feedback status",
            )
            .await?;
        Ok(status.has_feedback)
    }

    /// Sections of a document already rated by `user_id`
    pub async fn section_feedback_status(
        &self,
        user_id: &str,
        documentation_id: i64,
    ) -> InsightResult<SectionFeedbackStatus> {
        let id = documentation_id.to_string();
        self.get_json(
            &["feedback-status"],
            &[("user_id", user_id), ("documentation_id", &id)],
            "Failed to fetch feedback status",
        )
        .await
    }
}
