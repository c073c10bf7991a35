pub mod loader;
pub mod validator;

pub use loader::{ConfigLoader, ConfigSource, DEFAULT_ENV_PREFIX};
pub use validator::ConfigValidator;
