/// Configuration management for the WebFinger server
use crate::error::{FingerError, FingerResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or unparsable
pub const DEFAULT_LOG_FILTER: &str = "webfinger_server=debug,tower_http=debug";

/// Main server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub service: ServiceConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

/// Service-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub hostname: String,
    pub port: u16,
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_directory: PathBuf,
    pub account_db: PathBuf,
    pub max_connections: u32,
    pub enable_wal: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directives, e.g. `info` or `webfinger_server=debug`
    pub level: String,
}

impl LoggingConfig {
    /// Tracing filter for the configured directives
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> FingerResult<Self> {
        dotenv::dotenv().ok();

        let hostname = env::var("WEBFINGER_HOSTNAME").unwrap_or_else(|_| "localhost".to_string());
        let port = env::var("WEBFINGER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| FingerError::Validation("Invalid port number".to_string()))?;

        let data_directory: PathBuf = env::var("WEBFINGER_DATA_DIRECTORY")
            .unwrap_or_else(|_| "./data".to_string())
            .into();
        let account_db = env::var("WEBFINGER_ACCOUNT_DB_LOCATION")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_directory.join("account.sqlite"));
        let max_connections = env::var("WEBFINGER_DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .unwrap_or(10);
        let enable_wal = env::var("WEBFINGER_DB_WAL")
            .unwrap_or_else(|_| "true".to_string())
            .parse()
            .unwrap_or(true);

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string());

        Ok(ServerConfig {
            service: ServiceConfig { hostname, port },
            storage: StorageConfig {
                data_directory,
                account_db,
                max_connections,
                enable_wal,
            },
            logging: LoggingConfig { level: log_level },
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> FingerResult<()> {
        if self.service.hostname.is_empty() {
            return Err(FingerError::Validation("Hostname cannot be empty".to_string()));
        }

        if self.service.port == 0 {
            return Err(FingerError::Validation("Port cannot be 0".to_string()));
        }

        if self.storage.max_connections == 0 {
            return Err(FingerError::Validation(
                "Database connection limit must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Address the HTTP listener binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.service.hostname, self.service.port)
    }
}

#[cfg(test)]
pub(crate) fn test_config() -> ServerConfig {
    ServerConfig {
        service: ServiceConfig {
            hostname: "localhost".to_string(),
            port: 8080,
        },
        storage: StorageConfig {
            data_directory: PathBuf::from("./data"),
            account_db: PathBuf::from("./data/account.sqlite"),
            max_connections: 1,
            enable_wal: false,
        },
        logging: LoggingConfig {
            level: "info".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        let config = test_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.bind_address(), "localhost:8080");
    }

    #[test]
    fn test_empty_hostname_rejected() {
        let mut config = test_config();
        config.service.hostname = String::new();
        assert!(matches!(config.validate(), Err(FingerError::Validation(_))));
    }

    #[test]
    fn test_zero_port_rejected() {
        let mut config = test_config();
        config.service.port = 0;
        assert!(matches!(config.validate(), Err(FingerError::Validation(_))));
    }

    #[test]
    fn test_env_filter_uses_configured_level() {
        let logging = LoggingConfig {
            level: "warn".to_string(),
        };
        assert_eq!(logging.env_filter().to_string(), "warn");
    }

    #[test]
    fn test_env_filter_falls_back_on_bad_directive() {
        let logging = LoggingConfig {
            level: "webfinger_server=loud".to_string(),
        };
        assert!(logging
            .env_filter()
            .to_string()
            .contains("webfinger_server=debug"));
    }

    #[test]
    fn test_zero_connections_rejected() {
        let mut config = test_config();
        config.storage.max_connections = 0;
        assert!(matches!(config.validate(), Err(FingerError::Validation(_))));
    }
}
