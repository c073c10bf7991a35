//! Infrastructure Layer - configuration files and session storage

pub mod config;
pub mod session;

pub use config::{ConfigLoader, ConfigSource, ConfigValidator};
pub use session::{FileTokenStore, MemoryTokenStore, TokenStore};
