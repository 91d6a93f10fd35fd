/// HTTP server configuration.
///
/// Defaults can be overridden with the `HOST` and `PORT` environment variables.
use crate::error::ConfigError;

/// Address the server binds to when `HOST` is not set.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Port the server listens on when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 8000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// Build the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(host) = lookup("HOST") {
            let host = host.trim();
            if host.is_empty() {
                return Err(ConfigError::EmptyHost);
            }
            config.host = host.to_string();
        }
        if let Some(port) = lookup("PORT") {
            config.port = port
                .trim()
                .parse()
                .map_err(|source| ConfigError::InvalidPort { value: port.clone(), source })?;
        }
        Ok(config)
    }
}
