use crate::client::{decode_json, ApiClient};
use crate::upload::UploadFile;
use common::InsightResult;
use domain::DomainError;
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::Deserialize;
use tracing::info;

/// `POST /upload` response; `path` is where the server stored the project
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub message: String,
    pub path: String,
}

impl ApiClient {
    /// Upload a project as one multipart request.
    ///
    /// Every file becomes a `files` part named by its relative path. The
    /// form is rebuilt for each attempt.
    pub async fn upload_project(
        &self,
        project_name: &str,
        files: &[UploadFile],
    ) -> InsightResult<UploadResponse> {
        if files.is_empty() {
            return Err(DomainError::InvalidUpload("no files to upload".into()).into());
        }
        if project_name.trim().is_empty() {
            return Err(DomainError::MissingField("project_name".into()).into());
        }

        let total_bytes: usize = files.iter().map(|f| f.bytes.len()).sum();
        info!(project = project_name, files = files.len(), total_bytes, "Uploading project");

        let url = self.endpoint(&["upload"])?;
        let response = self
            .retrying("upload", || {
                let request = self
                    .request(Method::POST, url.clone())
                    .multipart(build_form(project_name, files));
                async move { self.send(request, "Upload failed").await }
            })
            .await?;

        let uploaded: UploadResponse = decode_json(response).await?;
        info!(path = %uploaded.path, "Upload complete");
        Ok(uploaded)
    }
}

fn build_form(project_name: &str, files: &[UploadFile]) -> Form {
    files.iter().fold(
        Form::new().text("project_name", project_name.to_string()),
        |form, file| {
            let part = Part::bytes(file.bytes.clone()).file_name(file.relative_path.clone());
            form.part("files", part)
        },
    )
}
