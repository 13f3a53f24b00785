//! Server configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use std::net::{Ipv4Addr, SocketAddr};

use football_tournament::db::DatabaseConfig;
use football_tournament::db::config::parse_env_or;

/// Port used when neither `SERVER_BIND` nor `API_PORT` is set
pub const DEFAULT_PORT: u16 = 8080;

/// Complete server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server bind address
    pub bind: SocketAddr,
    /// Database configuration
    pub database: DatabaseConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `bind_override` - Bind address from the command line
    /// * `database_url_override` - Database URL from the command line
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if `SERVER_BIND` is set but unparseable.
    pub fn from_env(
        bind_override: Option<SocketAddr>,
        database_url_override: Option<String>,
    ) -> Result<Self, ConfigError> {
        let bind = match bind_override {
            Some(bind) => bind,
            None => match std::env::var("SERVER_BIND") {
                Ok(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                    var: "SERVER_BIND".to_string(),
                    reason: format!("'{raw}' is not an IP:PORT address"),
                })?,
                Err(_) => SocketAddr::from((
                    Ipv4Addr::UNSPECIFIED,
                    parse_env_or("API_PORT", DEFAULT_PORT),
                )),
            },
        };

        let mut database = DatabaseConfig::from_env();
        if let Some(url) = database_url_override {
            database.database_url = url;
        }

        Ok(ServerConfig { bind, database })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        let db = &self.database;

        if db.max_connections == 0 {
            return Err(ConfigError::Invalid {
                var: "DB_MAX_CONNECTIONS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if db.min_connections > db.max_connections {
            return Err(ConfigError::Invalid {
                var: "DB_MIN_CONNECTIONS".to_string(),
                reason: format!(
                    "Cannot exceed max connections ({})",
                    db.max_connections
                ),
            });
        }

        if db.query_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                var: "DB_QUERY_TIMEOUT_SECS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if db.connect_retries == 0 {
            return Err(ConfigError::Invalid {
                var: "DB_CONNECT_RETRIES".to_string(),
                reason: "Must be at least 1".to_string(),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}
