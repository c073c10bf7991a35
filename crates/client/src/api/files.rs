use crate::client::ApiClient;
use common::InsightResult;
use domain::entities::clean_project_name;
use domain::FileNode;
use tracing::info;

impl ApiClient {
    /// Project tree as stored by the server. No retry: a failure is shown
    /// as-is and the tree stays empty.
    pub async fn file_structure(&self, project_name: &str) -> InsightResult<Vec<FileNode>> {
        let project = clean_project_name(project_name);
        let nodes: Vec<FileNode> = self
            .get_json(
                &["file-structure", project],
                &[],
                "Failed to fetch file structure",
            )
            .await?;
        info!(project, roots = nodes.len(), "Fetched file structure");
        Ok(nodes)
    }
}
