//! POS API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults, so a bare `pos-api` starts a usable local instance.

use std::env;
use thiserror::Error;

/// POS API configuration.
#[derive(Debug, Clone)]
pub struct PosConfig {
    /// HTTP listen port
    pub http_port: u16,

    /// Path to the SQLite database file
    pub database_path: String,

    /// Maximum database pool connections
    pub db_max_connections: u32,
}

impl PosConfig {
    /// Load configuration from environment variables.
    ///
    /// ## Variables
    /// - `POS_HTTP_PORT` (default: 8080)
    /// - `POS_DATABASE_PATH` (default: ./balcao.db)
    /// - `POS_DB_MAX_CONNECTIONS` (default: 5)
    pub fn load() -> Result<Self, ConfigError> {
        let config = PosConfig {
            http_port: env::var("POS_HTTP_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("POS_HTTP_PORT".to_string()))?,

            database_path: env::var("POS_DATABASE_PATH")
                .unwrap_or_else(|_| "./balcao.db".to_string()),

            db_max_connections: env::var("POS_DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("POS_DB_MAX_CONNECTIONS".to_string()))?,
        };

        Ok(config)
    }
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        // Only assert the defaults when the variables are unset in the
        // environment running the tests.
        if env::var("POS_HTTP_PORT").is_err() && env::var("POS_DATABASE_PATH").is_err() {
            let config = PosConfig::load().unwrap();
            assert_eq!(config.http_port, 8080);
            assert_eq!(config.database_path, "./balcao.db");
            assert_eq!(config.db_max_connections, 5);
        }
    }
}
