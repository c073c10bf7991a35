use anyhow::{anyhow, bail, Result};
use domain::config::*;
use tracing::warn;
use url::{Host, Url};

pub struct ConfigValidator;

impl ConfigValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, config: &InsightConfig) -> Result<()> {
        self.validate_api_config(&config.api)?;
        self.validate_polling_config(&config.polling)?;
        self.validate_logging_config(&config.logging)?;
        self.validate_session_config(&config.session)?;
        Ok(())
    }

    fn validate_api_config(&self, config: &ApiConfig) -> Result<()> {
        let url = Url::parse(config.base_url.trim())
            .map_err(|e| anyhow!("base_url is not a valid URL '{}': {}", config.base_url, e))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!(
                "base_url must start with http:// or https://, got '{}'",
                config.base_url
            );
        }
        if url.host().is_none() || url.cannot_be_a_base() {
            bail!("base_url has no host: '{}'", config.base_url);
        }
        if url.scheme() == "http" && !is_loopback(&url) {
            warn!("base_url uses plain http for a remote host: {}", url);
        }

        if config.timeout_secs == 0 {
            bail!("timeout_secs must be greater than 0");
        }
        if config.retry_attempts > 10 {
            bail!("retry_attempts must be at most 10, got {}", config.retry_attempts);
        }
        if config.retry_delay_ms > 60_000 {
            bail!("retry_delay_ms must be at most 60000, got {}", config.retry_delay_ms);
        }
        Ok(())
    }

    fn validate_polling_config(&self, config: &PollingConfig) -> Result<()> {
        if config.interval_ms < 100 {
            bail!("polling interval_ms must be at least 100, got {}", config.interval_ms);
        }
        if config.completion_delay_ms > 60_000 {
            warn!(
                "completion_delay_ms is {}ms, the result page will open late",
                config.completion_delay_ms
            );
        }
        Ok(())
    }

    fn validate_logging_config(&self, config: &LoggingConfig) -> Result<()> {
        // Full filter directives (`client=debug,info`) are passed through as-is
        if config.level.contains('=') || config.level.contains(',') {
            return Ok(());
        }
        let valid_levels = ["trace", "debug", "info", "warn", "error", "off"];
        if !valid_levels.contains(&config.level.to_lowercase().as_str()) {
            bail!(
                "Invalid log level '{}'. Must be one of: {:?}",
                config.level,
                valid_levels
            );
        }
        Ok(())
    }

    fn validate_session_config(&self, config: &SessionConfig) -> Result<()> {
        if let Some(path) = &config.token_file {
            if path.is_dir() {
                bail!("token_file points to a directory: {}", path.display());
            }
        }
        Ok(())
    }
}

impl Default for ConfigValidator {
    fn default() -> Self {
        Self::new()
    }
}

fn is_loopback(url: &Url) -> bool {
    match url.host() {
        Some(Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
        Some(Host::Ipv4(ip)) => ip.is_loopback(),
        Some(Host::Ipv6(ip)) => ip.is_loopback(),
        None => false,
    }
}
