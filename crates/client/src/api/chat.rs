use crate::client::ApiClient;
use common::InsightResult;
use domain::entities::{ChatQuery, ChatReply, ChatThread, VectorizeStatus};
use serde::Deserialize;
use tracing::info;

/// `POST /chat/vectorize` response
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VectorizeResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub chunks_processed: u64,
}

impl ApiClient {
    pub async fn vectorize_status(&self, project_name: &str) -> InsightResult<bool> {
        let status: VectorizeStatus = self
            .get_json(
                &["chat", "vectorize-status", project_name],
                &[],
                "Failed to check vectorization status",
            )
            .await?;
        Ok(status.is_vectorized)
    }

    pub async fn vectorize(&self, project_name: &str) -> InsightResult<VectorizeResponse> {
        let response: VectorizeResponse = self
            .post_query(
                &["chat", "vectorize"],
                &[("project_name", project_name)],
                "Failed to vectorize project",
            )
            .await?;
        info!(
            project = project_name,
            chunks = response.chunks_processed,
            "Project vectorized"
        );
        Ok(response)
    }

    pub async fn chat_history(&self, project_name: &str) -> InsightResult<Vec<ChatThread>> {
        self.get_json(
            &["chat", "history", project_name],
            &[],
            "Failed to load chat history",
        )
        .await
    }

    pub async fn send_chat_message(&self, query: &ChatQuery) -> InsightResult<ChatReply> {
        self.post_json(&["chat", "message"], query, "Failed to send message")
            .await
    }

    pub async fn delete_chat(&self, chat_id: &str) -> InsightResult<()> {
        self.delete(&["chat", "history", chat_id], "Failed to delete chat")
            .await?;
        info!(chat_id, "Chat deleted");
        Ok(())
    }
}
