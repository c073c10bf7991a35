use super::models::resolve_models;
use super::tree::{apply_selection, fetch_selection_tree};
use crate::context::AppContext;
use crate::notify;
use crate::progress::GenerationProgress;
use crate::render;
use anyhow::{bail, Result};
use clap::Args;
use client::{GenerationPoller, PollOutcome};
use colored::Colorize;
use domain::GenerateRequest;
use tracing::{info, warn};

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Project name as uploaded
    #[arg(long)]
    pub project: String,

    /// Tree path to include; folders bring their whole subtree
    #[arg(long = "select", value_name = "PATH", required_unless_present = "all")]
    pub select: Vec<String>,

    /// Select every top-level entry
    #[arg(long, conflicts_with = "select")]
    pub all: bool,

    #[arg(long)]
    pub file_model: Option<String>,

    #[arg(long)]
    pub folder_model: Option<String>,

    #[arg(long)]
    pub project_model: Option<String>,

    /// Print the progress key and return without waiting
    #[arg(long)]
    pub no_wait: bool,
}

impl GenerateArgs {
    pub async fn execute(self, ctx: &AppContext) -> Result<()> {
        ctx.current_user().await?;
        let user_id = ctx.auth().user_id();

        let mut tree = fetch_selection_tree(ctx.client(), &self.project).await?;
        let paths: Vec<String> = if self.all {
            tree.roots().iter().map(|root| root.path.clone()).collect()
        } else {
            self.select.clone()
        };
        apply_selection(&mut tree, &paths)?;

        let models = resolve_models(
            ctx.client(),
            self.file_model,
            self.folder_model,
            self.project_model,
        )
        .await?;
        let request = GenerateRequest::new(user_id, &self.project, tree.selection(), models)?;
        info!(
            project = %request.project_name,
            root_path = %request.root_path,
            "Generation request prepared"
        );

        let progress_key = ctx.client().generate(&request).await?;
        notify::success(&format!(
            "Generation started for {} ({} paths)",
            request.project_name.bold(),
            request.selected_items.len()
        ));
        println!("   progress key: {progress_key}");

        if self.no_wait {
            println!("   Follow it with: code-insight status {progress_key}");
            return Ok(());
        }
        watch(ctx, &progress_key).await
    }
}

/// `status <key>`: follow a running job until it ends
pub async fn watch(ctx: &AppContext, progress_key: &str) -> Result<()> {
    let poller = GenerationPoller::new(ctx.shared_client(), ctx.config().polling.clone());

    let cancel = poller.cancellation_token();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });

    // Redirected stderr gets no bar, only the final notices
    let progress = if console::user_attended_stderr() {
        GenerationProgress::new()
    } else {
        GenerationProgress::hidden()
    };
    let mut last_status = None;
    let outcome = poller
        .run(
            progress_key,
            |status| {
                progress.update(status);
                last_status = Some(status.clone());
            },
            |_| progress.finish_success("Documentation ready"),
        )
        .await;
    interrupt.abort();

    match outcome {
        PollOutcome::Completed(status) => {
            print!("{}", render::generation_steps(&status));
            let project = status.project_name.as_deref().unwrap_or("the project");
            notify::success(&format!("Documentation generated for {project}"));
            Ok(())
        }
        PollOutcome::Failed(message) => {
            progress.finish_error(&message);
            if let Some(status) = &last_status {
                print!("{}", render::generation_steps(status));
            }
            bail!(message)
        }
        PollOutcome::Cancelled => {
            progress.finish_and_clear();
            warn!(progress_key, "Stopped watching generation");
            notify::warning(&format!(
                "Stopped watching. The job keeps running; resume with 'code-insight status {progress_key}'"
            ));
            Ok(())
        }
    }
}
