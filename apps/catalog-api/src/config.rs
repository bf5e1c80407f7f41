//! Configuration for Catalog API

use std::time::Duration;

use core_config::{env_or_default, server::ServerConfig, ConfigError, FromEnv};
use database::postgres::PostgresConfig;

pub use core_config::Environment;

/// Stock collaborator client settings
#[derive(Clone, Debug)]
pub struct StockConfig {
    pub base_url: String,
    /// Hard per-request timeout; keeps the catalog's degrade path reachable
    /// when the collaborator hangs
    pub timeout_secs: u64,
}

impl StockConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl FromEnv for StockConfig {
    /// Reads from environment variables with sensible defaults:
    /// - STOCK_SERVICE_URL: defaults to http://localhost:8081
    /// - STOCK_TIMEOUT_SECS: defaults to 3
    fn from_env() -> Result<Self, ConfigError> {
        let base_url = env_or_default("STOCK_SERVICE_URL", "http://localhost:8081");
        let timeout_secs = env_or_default("STOCK_TIMEOUT_SECS", "3").parse().map_err(|e| {
            ConfigError::ParseError {
                key: "STOCK_TIMEOUT_SECS".to_string(),
                details: format!("{}", e),
            }
        })?;

        Ok(Self {
            base_url,
            timeout_secs,
        })
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub postgres: PostgresConfig,
    pub server: ServerConfig,
    pub stock: StockConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let postgres = PostgresConfig::from_env()?;
        let server = ServerConfig::from_env()?;
        let stock = StockConfig::from_env()?;

        Ok(Self {
            postgres,
            server,
            stock,
            environment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_config_defaults() {
        temp_env::with_vars(
            [
                ("STOCK_SERVICE_URL", None::<&str>),
                ("STOCK_TIMEOUT_SECS", None::<&str>),
            ],
            || {
                let config = StockConfig::from_env().unwrap();
                assert_eq!(config.base_url, "http://localhost:8081");
                assert_eq!(config.timeout(), Duration::from_secs(3));
            },
        );
    }

    #[test]
    fn test_stock_config_invalid_timeout() {
        temp_env::with_var("STOCK_TIMEOUT_SECS", Some("soon"), || {
            let err = StockConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("STOCK_TIMEOUT_SECS"));
        });
    }
}
