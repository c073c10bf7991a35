use super::MessageResponse;
use crate::client::ApiClient;
use common::InsightResult;
use domain::entities::{
    process_documentation, DocumentUpdate, DocumentationRef, Project, Section, SectionUpdate,
};
use tracing::info;

impl ApiClient {
    /// Raw documentation body for `path`, as sent by the server
    pub async fn documentation(&self, path: &str) -> InsightResult<String> {
        let query = [("path", path)];
        self.retrying("documentation", || {
            self.get_text(&["documentation"], &query, "Failed to fetch documentation")
        })
        .await
    }

    /// Documentation for `path` with the transport escaping removed
    pub async fn documentation_text(&self, path: &str) -> InsightResult<String> {
        let raw = self.documentation(path).await?;
        Ok(process_documentation(&raw))
    }

    pub async fn documentation_ref(&self, path: &str) -> InsightResult<DocumentationRef> {
        self.get_json(
            &["documentation", "id"],
            &[("path", path)],
            "Failed to fetch documentation id",
        )
        .await
    }

    pub async fn update_documentation(&self, id: i64, content: &str) -> InsightResult<()> {
        let id = id.to_string();
        let _: MessageResponse = self
            .put_json(
                &["documentation", &id],
                &DocumentUpdate {
                    doc_content: content,
                },
                "Failed to update documentation",
            )
            .await?;
        info!(documentation_id = %id, "Documentation updated");
        Ok(())
    }

    pub async fn sections(&self, documentation_id: i64) -> InsightResult<Vec<Section>> {
        let id = documentation_id.to_string();
        self.get_json(
            &["documentation", "sections", &id],
            &[],
            "Failed to fetch sections",
        )
        .await
    }

    pub async fn update_section(&self, section_id: i64, content: &str) -> InsightResult<()> {
        let id = section_id.to_string();
        let _: MessageResponse = self
            .put_json(
                &["documentation", "sections", &id],
                &SectionUpdate {
                    section_content: content,
                },
                "Failed to update section",
            )
            .await?;
        info!(section_id, "Section updated");
        Ok(())
    }

    /// Projects with project-level documentation, newest first
    pub async fn projects(&self) -> InsightResult<Vec<Project>> {
        self.get_json(
            &["documentation", "projects"],
            &[],
            "Failed to fetch projects",
        )
        .await
    }
}
