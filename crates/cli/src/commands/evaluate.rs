use super::models::resolve_models;
use crate::context::AppContext;
use crate::notify;
use crate::progress::ProgressBuilder;
use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use domain::DocLevel;

#[derive(Debug, Args)]
pub struct EvaluateArgs {
    /// Documentation path to evaluate
    #[arg(long)]
    pub path: String,

    /// file, folder or project; guessed from the path when omitted
    #[arg(long)]
    pub level: Option<DocLevel>,

    /// Model writing the evaluation (defaults to the first offered)
    #[arg(long)]
    pub model: Option<String>,
}

impl EvaluateArgs {
    pub async fn execute(self, ctx: &AppContext) -> Result<()> {
        let level = self
            .level
            .unwrap_or_else(|| DocLevel::classify_path(&self.path));
        let model = match self.model {
            Some(model) => model,
            None => resolve_models(ctx.client(), None, None, None).await?.file_model,
        };

        let spinner = ProgressBuilder::thinking(&format!("Evaluating with {model}..."));
        let result = ctx.client().evaluation(&self.path, level, &model).await;
        spinner.finish_and_clear();
        let evaluation = result?;

        if let Some(error) = evaluation.error.filter(|e| !e.is_empty()) {
            bail!(error);
        }
        println!(
            "{} {} ({}, {})",
            "Evaluation of".dimmed(),
            self.path.bold(),
            level,
            model
        );
        println!();
        println!("{}", evaluation.evaluation);
        notify::info("Rate this document with 'code-insight feedback file'");
        Ok(())
    }
}
