use std::net::SocketAddr;
use std::path::PathBuf;

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub engine_config_path: Option<PathBuf>,
    pub source_url: Option<String>,
    pub source_timeout_secs: u64,
    pub source_user_agent: String,
}

impl AppConfig {
    /// The signal source URL, or an error naming the env var that sets it.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` when no source URL is configured.
    pub fn source_url_required(&self) -> Result<&str, ConfigError> {
        self.source_url
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("TRUTHCART_SOURCE_URL".to_string()))
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("engine_config_path", &self.engine_config_path)
            // Source URLs can embed access tokens in the query string.
            .field("source_url", &self.source_url.as_ref().map(|_| "[redacted]"))
            .field("source_timeout_secs", &self.source_timeout_secs)
            .field("source_user_agent", &self.source_user_agent)
            .finish()
    }
}
