//! Persistent bearer-token storage.
//!
//! The terminal counterpart of the browser session cookie: the token is
//! written once (`session set`) and read back by every command.

use crate::config::ConfigLoader;
use common::{InsightError, InsightResult};
use parking_lot::Mutex;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub trait TokenStore: Send + Sync {
    fn load(&self) -> InsightResult<Option<String>>;
    fn save(&self, token: &str) -> InsightResult<()>;
    fn clear(&self) -> InsightResult<()>;
}

/// Token kept in a single file, `~/.config/code-insight/session` by default
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn default_path() -> InsightResult<PathBuf> {
        ConfigLoader::user_config_dir()
            .map(|dir| dir.join("session"))
            .ok_or_else(|| {
                InsightError::Configuration("cannot determine the home directory".into())
            })
    }

    /// Store at `path`, or at the default location when `None`
    pub fn at(path: Option<&Path>) -> InsightResult<Self> {
        match path {
            Some(path) => Ok(Self::new(path.to_path_buf())),
            None => Ok(Self::new(Self::default_path()?)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> InsightResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                let token = content.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, token: &str) -> InsightResult<()> {
        let token = token.trim();
        if token.is_empty() {
            return Err(InsightError::Configuration("token cannot be empty".into()));
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, token)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;
        }
        debug!(path = %self.path.display(), "Session token saved");
        Ok(())
    }

    fn clear(&self) -> InsightResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "Session token removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Process-local store
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> InsightResult<Option<String>> {
        Ok(self.token.lock().clone())
    }

    fn save(&self, token: &str) -> InsightResult<()> {
        *self.token.lock() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> InsightResult<()> {
        *self.token.lock() = None;
        Ok(())
    }
}
