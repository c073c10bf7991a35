use crate::context::GlobalArgs;
use crate::notify;
use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use infrastructure::config::{ConfigLoader, ConfigSource, ConfigValidator};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Show the effective configuration (files, environment and flags)
    Show {
        /// Print as JSON instead of TOML
        #[arg(long)]
        json: bool,
    },

    /// Write an example configuration file
    Init {
        /// Output path
        #[arg(short, long, default_value = ".code-insight.toml")]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Check the effective configuration for unusable values
    #[command(alias = "check")]
    Validate,
}

impl ConfigCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> Result<()> {
        match &self.command {
            ConfigSubcommand::Show { json } => show_config(global, *json).await,
            ConfigSubcommand::Init { output, force } => init_config(output, *force).await,
            ConfigSubcommand::Validate => validate_config(global).await,
        }
    }
}

async fn show_config(global: &GlobalArgs, json: bool) -> Result<()> {
    let (config, source) = global.resolve_config().await?;

    match source {
        ConfigSource::File(path) => println!("# Loaded from {}", path.display()),
        ConfigSource::Default => println!("# No configuration file found, using defaults"),
    }
    let output = if json {
        serde_json::to_string_pretty(&config)?
    } else {
        toml::to_string_pretty(&config)?
    };
    println!("{output}");
    Ok(())
}

async fn init_config(output: &Path, force: bool) -> Result<()> {
    if output.exists() && !force {
        bail!(
            "Configuration file already exists at {} (use --force to overwrite)",
            output.display()
        );
    }

    let example = ConfigLoader::generate_example_config();
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(output, example).await?;
    info!("Configuration file generated at: {}", output.display());

    notify::success(&format!("Configuration written to {}", output.display()));
    println!("   Set api.base_url to your Code Insight server, then run");
    println!("   'code-insight config validate'");
    Ok(())
}

async fn validate_config(global: &GlobalArgs) -> Result<()> {
    let (config, source) = global.resolve_config().await?;
    ConfigValidator::new().validate(&config)?;

    let origin = match source {
        ConfigSource::File(path) => path.display().to_string(),
        ConfigSource::Default => "defaults".to_string(),
    };
    notify::success(&format!("Configuration is valid ({origin})"));
    Ok(())
}
