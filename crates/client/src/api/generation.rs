use crate::client::ApiClient;
use common::InsightResult;
use domain::entities::GenerateResponse;
use domain::{GenerateRequest, GenerationStatus};
use tracing::{debug, info};

impl ApiClient {
    /// Start a generation job and return its progress key
    pub async fn generate(&self, request: &GenerateRequest) -> InsightResult<String> {
        info!(
            project = %request.project_name,
            items = request.selected_items.len(),
            "Starting documentation generation"
        );
        let response: GenerateResponse = self
            .retrying("generate", || {
                self.post_json(&["generate"], request, "Failed to start generation")
            })
            .await?;
        Ok(response.progress_key)
    }

    pub async fn generation_status(&self, progress_key: &str) -> InsightResult<GenerationStatus> {
        let status: GenerationStatus = self
            .get_json(
                &["generate", "status", progress_key],
                &[],
                "Failed to fetch generation status",
            )
            .await?;
        debug!(
            progress_key,
            progress = status.progress,
            step = %status.current_step,
            "Generation status"
        );
        Ok(status)
    }

    /// Drop the server-side status record of a finished job
    pub async fn clear_generation_status(&self, progress_key: &str) -> InsightResult<()> {
        self.delete(
            &["generate", "status", progress_key],
            "Failed to clear generation status",
        )
        .await
    }
}
