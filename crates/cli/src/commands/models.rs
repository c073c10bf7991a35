use crate::context::AppContext;
use crate::notify;
use anyhow::{bail, Result};
use client::ApiClient;
use colored::Colorize;
use domain::entities::ModelChoice;

/// `models`: choices offered for the file, folder and project documents
pub async fn list_models(ctx: &AppContext) -> Result<()> {
    let models = ctx.client().models().await?;
    if models.is_empty() {
        notify::warning("The server has no models configured");
        return Ok(());
    }
    for model in models {
        match model.description.as_deref().filter(|d| !d.is_empty()) {
            Some(description) => println!(
                "- {} ({}) {}",
                model.key.bold(),
                model.value,
                description.dimmed()
            ),
            None => println!("- {} ({})", model.key.bold(), model.value),
        }
    }
    Ok(())
}

/// Explicit choices, falling back to the first model the server offers
pub async fn resolve_models(
    client: &ApiClient,
    file_model: Option<String>,
    folder_model: Option<String>,
    project_model: Option<String>,
) -> Result<ModelChoice> {
    let fallback = if file_model.is_none() || folder_model.is_none() || project_model.is_none() {
        let models = client.models().await?;
        match models.into_iter().next() {
            Some(first) => Some(first.value),
            None => bail!("No models available on the server; pass --file-model, --folder-model and --project-model"),
        }
    } else {
        None
    };

    let pick = |choice: Option<String>| choice.or_else(|| fallback.clone()).unwrap_or_default();
    Ok(ModelChoice {
        file_model: pick(file_model),
        folder_model: pick(folder_model),
        project_model: pick(project_model),
    })
}
