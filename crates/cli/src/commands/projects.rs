use crate::context::AppContext;
use crate::notify;
use crate::progress::ProgressBuilder;
use anyhow::Result;
use colored::Colorize;

/// `projects`: projects with generated project-level documentation
pub async fn list_projects(ctx: &AppContext) -> Result<()> {
    ctx.require_user().await?;

    let spinner = ProgressBuilder::request("Loading projects...");
    let projects = ctx.client().projects().await;
    spinner.finish_and_clear();
    let projects = projects?;

    if projects.is_empty() {
        notify::info("No documented projects yet. Start with 'code-insight upload <dir>'.");
        return Ok(());
    }
    println!("{} {}", "✓".green(), format!("Projects: {}", projects.len()).bold());
    for project in projects {
        match project.created_at {
            Some(created) => println!("- {} {}", project.project_name.bold(), created.dimmed()),
            None => println!("- {}", project.project_name.bold()),
        }
    }
    Ok(())
}
