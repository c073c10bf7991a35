//! Per-invocation application state: resolved configuration, API client and
//! session. Built once in `main` and passed to every command by reference.

use anyhow::{Context, Result};
use clap::Args;
use client::{ApiClient, AuthContext};
use domain::{InsightConfig, User};
use infrastructure::config::{ConfigLoader, ConfigSource, ConfigValidator};
use infrastructure::session::{FileTokenStore, TokenStore};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Flags accepted by every subcommand; they override file and environment
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// Configuration file to use instead of the search path
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// API base URL, e.g. http://localhost:8000/api
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// File holding the session token
    #[arg(long, global = true, value_name = "PATH")]
    pub token_file: Option<PathBuf>,

    /// Log level or filter directive
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

impl GlobalArgs {
    /// Load file + environment configuration and apply the flags on top.
    /// The result is not validated.
    pub async fn resolve_config(&self) -> Result<(InsightConfig, ConfigSource)> {
        let loader = match &self.config {
            Some(path) => ConfigLoader::new().with_path(path.clone()),
            None => ConfigLoader::new(),
        };
        let (mut config, source) = loader.load_with_source().await?;

        if let Some(url) = &self.base_url {
            config.api.base_url = url.clone();
        }
        if let Some(path) = &self.token_file {
            config.session.token_file = Some(path.clone());
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        Ok((config, source))
    }
}

pub struct AppContext {
    config: InsightConfig,
    client: Arc<ApiClient>,
    auth: AuthContext,
}

impl AppContext {
    /// Validate `config` and open the client with the stored session token
    pub fn connect(config: InsightConfig) -> Result<Self> {
        ConfigValidator::new()
            .validate(&config)
            .context("Invalid configuration")?;

        let store = FileTokenStore::at(config.session.token_file.as_deref())?;
        let token = store.load()?;
        debug!(
            token_file = %store.path().display(),
            has_token = token.is_some(),
            "Session store opened"
        );

        let client = Arc::new(ApiClient::new(&config.api)?.with_token(token));
        let auth = AuthContext::new(Arc::clone(&client), Arc::new(store));
        Ok(Self {
            config,
            client,
            auth,
        })
    }

    pub fn config(&self) -> &InsightConfig {
        &self.config
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn shared_client(&self) -> Arc<ApiClient> {
        Arc::clone(&self.client)
    }

    pub fn auth(&self) -> &AuthContext {
        &self.auth
    }

    /// Current user, resolving the session on first use
    pub async fn current_user(&self) -> Result<Option<User>> {
        if let Some(user) = self.auth.current_user() {
            return Ok(Some(user));
        }
        Ok(self.auth.init().await?)
    }

    /// Like [`AppContext::current_user`] but signed-in is mandatory
    pub async fn require_user(&self) -> Result<User> {
        self.current_user().await?;
        Ok(self.auth.require_user()?)
    }
}
