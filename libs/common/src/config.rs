//! Service configuration
//!
//! Settings are layered: built-in defaults first, then environment variables
//! prefixed with `REGISTRY_`.

use config::{Config, Environment, Map};
use serde::Deserialize;
use tracing::debug;

use crate::error::{ConfigError, ConfigResult};

/// Environment variable prefix for every setting
pub const ENV_PREFIX: &str = "REGISTRY";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5294;
const DEFAULT_LOG_LEVEL: &str = "info";

/// How the registry assigns ids to new records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdStrategy {
    /// Counter that only moves forward; ids are never reused
    #[default]
    Monotonic,
    /// `count + 1` at creation time; ids can repeat after deletions
    CollectionSize,
}

/// Server configuration struct
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// TCP port to listen on
    pub port: u16,
    /// Default log filter when `RUST_LOG` is not set
    pub log_level: String,
    /// Id assignment scheme for created users
    pub id_strategy: IdStrategy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            id_strategy: IdStrategy::default(),
        }
    }
}

impl ServerConfig {
    /// Create a new ServerConfig from environment variables
    ///
    /// # Environment Variables
    /// - `REGISTRY_HOST`: interface to bind (default: "127.0.0.1")
    /// - `REGISTRY_PORT`: port to listen on (default: 5294)
    /// - `REGISTRY_LOG_LEVEL`: fallback log filter (default: "info")
    /// - `REGISTRY_ID_STRATEGY`: `monotonic` or `collection_size` (default: `monotonic`)
    pub fn from_env() -> ConfigResult<Self> {
        Self::load(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
    }

    /// Create a ServerConfig from an explicit variable map instead of the
    /// process environment
    pub fn from_source(vars: Map<String, String>) -> ConfigResult<Self> {
        Self::load(
            Environment::with_prefix(ENV_PREFIX)
                .try_parsing(true)
                .source(Some(vars)),
        )
    }

    fn load(environment: Environment) -> ConfigResult<Self> {
        let config: Self = Config::builder()
            .set_default("host", DEFAULT_HOST)?
            .set_default("port", i64::from(DEFAULT_PORT))?
            .set_default("log_level", DEFAULT_LOG_LEVEL)?
            .set_default("id_strategy", "monotonic")?
            .add_source(environment)
            .build()?
            .try_deserialize()?;

        if config.host.trim().is_empty() {
            return Err(ConfigError::Invalid("host must not be empty".to_string()));
        }

        debug!(?config, "Loaded server configuration");
        Ok(config)
    }

    /// Address in `host:port` form, ready for a TCP bind
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Map<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_without_variables() {
        let config = ServerConfig::from_source(Map::new()).expect("Failed to load config");
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 5294);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.id_strategy, IdStrategy::Monotonic);
        assert_eq!(config.bind_address(), "127.0.0.1:5294");
    }

    #[test]
    fn test_environment_overrides_defaults() {
        let config = ServerConfig::from_source(vars(&[
            ("REGISTRY_HOST", "0.0.0.0"),
            ("REGISTRY_PORT", "8080"),
            ("REGISTRY_LOG_LEVEL", "debug"),
            ("REGISTRY_ID_STRATEGY", "collection_size"),
        ]))
        .expect("Failed to load config");

        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.id_strategy, IdStrategy::CollectionSize);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let result = ServerConfig::from_source(vars(&[("REGISTRY_PORT", "not-a-port")]));
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }

    #[test]
    fn test_unknown_id_strategy_is_rejected() {
        let result = ServerConfig::from_source(vars(&[("REGISTRY_ID_STRATEGY", "random")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_blank_host_is_rejected() {
        let result = ServerConfig::from_source(vars(&[("REGISTRY_HOST", "  ")]));
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }
}
