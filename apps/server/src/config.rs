//! Server configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults. `.env` files are honored via dotenvy (loaded in `main`).

use std::env;
use std::path::PathBuf;

/// REST API server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface to bind, e.g. `0.0.0.0` or `127.0.0.1`
    pub host: String,

    /// HTTP port
    pub port: u16,

    /// Path to the SQLite database file
    pub database_path: PathBuf,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable              | Default      |
    /// |-----------------------|--------------|
    /// | `VENDO_HOST`          | `0.0.0.0`    |
    /// | `VENDO_PORT`          | `4000`       |
    /// | `VENDO_DATABASE_PATH` | `vendo.db`   |
    pub fn load() -> Result<Self, ConfigError> {
        let config = ServerConfig {
            host: env::var("VENDO_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),

            port: env::var("VENDO_PORT")
                .unwrap_or_else(|_| "4000".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("VENDO_PORT".to_string()))?,

            database_path: env::var("VENDO_DATABASE_PATH")
                .unwrap_or_else(|_| "vendo.db".to_string())
                .into(),
        };

        Ok(config)
    }

    /// The socket address string to bind the listener to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
