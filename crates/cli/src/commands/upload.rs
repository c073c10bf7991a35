use crate::context::AppContext;
use crate::notify;
use crate::progress::ProgressBuilder;
use anyhow::Result;
use clap::Args;
use client::{collect_project_files, project_dir_name};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct UploadArgs {
    /// Project directory to upload
    pub dir: PathBuf,

    /// Project name on the server (defaults to the directory name)
    #[arg(long)]
    pub name: Option<String>,
}

impl UploadArgs {
    pub async fn execute(self, ctx: &AppContext) -> Result<()> {
        let files = collect_project_files(&self.dir).await?;
        let project_name = match self.name {
            Some(name) => name,
            None => project_dir_name(&self.dir)?,
        };

        let spinner =
            ProgressBuilder::upload(&format!("Uploading {} files of {}...", files.len(), project_name));
        match ctx.client().upload_project(&project_name, &files).await {
            Ok(response) => {
                spinner.finish_success(None);
                notify::success(&format!("Project stored at {}", response.path));
                println!("   Next: code-insight tree {project_name}");
                Ok(())
            }
            Err(e) => {
                spinner.finish_error(&e.user_message());
                Err(e.into())
            }
        }
    }
}
