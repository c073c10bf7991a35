use anyhow::{bail, Context, Result};
use domain::config::*;
use std::env;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

pub const DEFAULT_ENV_PREFIX: &str = "CODE_INSIGHT_";

/// Where the effective configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Default,
}

pub struct ConfigLoader {
    config_paths: Vec<PathBuf>,
    explicit_path: Option<PathBuf>,
    env_prefix: String,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            config_paths: Self::default_config_paths(),
            explicit_path: None,
            env_prefix: DEFAULT_ENV_PREFIX.to_string(),
        }
    }

    /// Use `path` and only `path`; a missing file is an error.
    pub fn with_path(mut self, path: PathBuf) -> Self {
        self.explicit_path = Some(path);
        self
    }

    /// Replace the search list (first existing file wins)
    pub fn with_search_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.config_paths = paths;
        self
    }

    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    pub fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(".code-insight.toml"),
            PathBuf::from(".code-insight.json"),
        ];
        if let Some(path) = Self::user_config_path() {
            paths.push(path);
        }
        paths
    }

    /// `~/.config/code-insight`, shared by the config file and the session token
    pub fn user_config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config").join("code-insight"))
    }

    /// `~/.config/code-insight/config.toml`
    pub fn user_config_path() -> Option<PathBuf> {
        Self::user_config_dir().map(|dir| dir.join("config.toml"))
    }

    pub async fn load(&self) -> Result<InsightConfig> {
        let (config, _) = self.load_with_source().await?;
        Ok(config)
    }

    pub async fn load_with_source(&self) -> Result<(InsightConfig, ConfigSource)> {
        let (config, source) = match &self.explicit_path {
            Some(path) => {
                if !path.exists() {
                    bail!("Config file not found: {}", path.display());
                }
                let config = self.load_file(path).await?;
                info!("Loaded configuration from: {}", path.display());
                (config, ConfigSource::File(path.clone()))
            }
            None => self.load_first_found().await,
        };

        let config = self.apply_env_overrides(config)?;
        Ok((config, source))
    }

    async fn load_first_found(&self) -> (InsightConfig, ConfigSource) {
        for path in &self.config_paths {
            if !path.exists() {
                continue;
            }
            match self.load_file(path).await {
                Ok(config) => {
                    info!("Loaded configuration from: {}", path.display());
                    return (config, ConfigSource::File(path.clone()));
                }
                Err(e) => {
                    warn!("Failed to load config from {}: {:#}", path.display(), e);
                }
            }
        }
        debug!("No config file found, using defaults");
        (InsightConfig::default(), ConfigSource::Default)
    }

    async fn load_file(&self, path: &Path) -> Result<InsightConfig> {
        let content = fs::read_to_string(path)
            .await
            .context("Failed to read config file")?;

        let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");

        match extension {
            "toml" | "" => toml::from_str(&content).context("Failed to parse TOML config"),
            "json" => serde_json::from_str(&content).context("Failed to parse JSON config"),
            _ => toml::from_str(&content)
                .or_else(|_| serde_json::from_str(&content))
                .context("Failed to parse config file"),
        }
    }

    fn var(&self, name: &str) -> Option<String> {
        env::var(format!("{}{}", self.env_prefix, name)).ok()
    }

    fn parsed_var<T: std::str::FromStr>(&self, name: &str) -> Result<Option<T>> {
        match self.var(name) {
            Some(raw) => match raw.trim().parse() {
                Ok(value) => Ok(Some(value)),
                Err(_) => bail!("Invalid value for {}{}: '{}'", self.env_prefix, name, raw),
            },
            None => Ok(None),
        }
    }

    fn apply_env_overrides(&self, mut config: InsightConfig) -> Result<InsightConfig> {
        // API
        if let Some(base_url) = self.var("BASE_URL") {
            config.api.base_url = base_url;
        }
        if let Some(timeout) = self.parsed_var("TIMEOUT_SECS")? {
            config.api.timeout_secs = timeout;
        }
        if let Some(attempts) = self.parsed_var("RETRY_ATTEMPTS")? {
            config.api.retry_attempts = attempts;
        }
        if let Some(delay) = self.parsed_var("RETRY_DELAY_MS")? {
            config.api.retry_delay_ms = delay;
        }

        // Polling
        if let Some(interval) = self.parsed_var("POLL_INTERVAL_MS")? {
            config.polling.interval_ms = interval;
        }

        // Logging
        if let Some(level) = self.var("LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Some(json) = self.var("LOG_JSON") {
            let json = json.to_lowercase();
            config.logging.json = json == "true" || json == "1" || json == "yes";
        }

        // Session
        if let Some(token_file) = self.var("TOKEN_FILE") {
            config.session.token_file = Some(PathBuf::from(token_file));
        }

        Ok(config)
    }

    pub async fn save_config(&self, config: &InsightConfig, path: &Path) -> Result<()> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("toml");

        let content = match extension {
            "json" => serde_json::to_string_pretty(config)?,
            _ => toml::to_string_pretty(config)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        fs::write(path, content).await?;
        info!("Configuration saved to: {}", path.display());

        Ok(())
    }

    pub fn generate_example_config() -> String {
        let mut config = InsightConfig::default();
        config.session.token_file = Self::user_config_dir().map(|dir| dir.join("session"));

        toml::to_string_pretty(&config)
            .unwrap_or_else(|_| "Failed to generate example config".to_string())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
