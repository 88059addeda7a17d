//! Configuration loading and management
//!
//! Configuration comes from an optional YAML file, then environment variables
//! override individual values:
//!
//! | Variable                          | Field             |
//! |-----------------------------------|-------------------|
//! | `PAYMENT_GATEWAY_HOST`            | `server.host`     |
//! | `PAYMENT_GATEWAY_PORT`            | `server.port`     |
//! | `PAYMENT_GATEWAY_BANK_URL`        | `bank.url`        |
//! | `PAYMENT_GATEWAY_BANK_TIMEOUT_MS` | `bank.timeout_ms` |

use crate::core::error::ConfigError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BANK_URL: &str = "http://localhost:8080/payments";

/// HTTP listener configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8090,
        }
    }
}

/// Bank simulator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BankConfig {
    /// Authorization endpoint
    pub url: String,

    /// Optional client-side timeout; without one a slow bank blocks its request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_BANK_URL.to_string(),
            timeout_ms: None,
        }
    }
}

/// Complete gateway configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub server: ServerConfig,
    pub bank: BankConfig,
}

impl GatewayConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            file: Some(path.to_string()),
            message: e.to_string(),
        })
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError {
            file: None,
            message: e.to_string(),
        })
    }

    /// Apply `PAYMENT_GATEWAY_*` overrides from the process environment
    pub fn apply_env_overrides(self) -> Result<Self, ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key/value source
    pub fn apply_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("PAYMENT_GATEWAY_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PAYMENT_GATEWAY_PORT") {
            self.server.port = parse_number("server.port", &port)?;
        }
        if let Some(url) = lookup("PAYMENT_GATEWAY_BANK_URL") {
            self.bank.url = url;
        }
        if let Some(timeout) = lookup("PAYMENT_GATEWAY_BANK_TIMEOUT_MS") {
            self.bank.timeout_ms = Some(parse_number("bank.timeout_ms", &timeout)?);
        }
        Ok(self)
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "server.host".to_string(),
                value: self.server.host.clone(),
                message: "host must not be empty".to_string(),
            });
        }

        if !(self.bank.url.starts_with("http://") || self.bank.url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "bank.url".to_string(),
                value: self.bank.url.clone(),
                message: "bank url must be http or https".to_string(),
            });
        }

        Ok(())
    }

    /// `host:port` to bind the HTTP listener to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_number<T: std::str::FromStr>(field: &str, value: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = GatewayConfig::default();

        assert_eq!(config.server.port, 8090);
        assert_eq!(config.bank.url, DEFAULT_BANK_URL);
        assert!(config.bank.timeout_ms.is_none());
        assert_eq!(config.bind_address(), "0.0.0.0:8090");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = GatewayConfig::from_yaml_str(
            r#"
bank:
  timeout_ms: 1500
"#,
        )
        .unwrap();

        assert_eq!(config.bank.timeout_ms, Some(1500));
        assert_eq!(config.bank.url, DEFAULT_BANK_URL);
        assert_eq!(config.server, ServerConfig::default());
    }

    #[test]
    fn test_yaml_serialization() {
        let config = GatewayConfig::default();
        let yaml = serde_yaml::to_string(&config).unwrap();

        let parsed = GatewayConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_invalid_yaml_is_parse_error() {
        let err = GatewayConfig::from_yaml_str("server: [").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { file: None, .. }));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("PAYMENT_GATEWAY_PORT", "9000"),
            ("PAYMENT_GATEWAY_BANK_URL", "http://bank:8080/payments"),
            ("PAYMENT_GATEWAY_BANK_TIMEOUT_MS", "500"),
        ]);

        let config = GatewayConfig::default()
            .apply_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.bank.url, "http://bank:8080/payments");
        assert_eq!(config.bank.timeout_ms, Some(500));
    }

    #[test]
    fn test_bad_port_override() {
        let err = GatewayConfig::default()
            .apply_overrides(|key| (key == "PAYMENT_GATEWAY_PORT").then(|| "http".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "server.port"));
    }

    #[test]
    fn test_validate_rejects_non_http_bank() {
        let mut config = GatewayConfig::default();
        config.bank.url = "ftp://bank/payments".to_string();
        assert!(config.validate().is_err());

        let mut config = GatewayConfig::default();
        config.server.host = " ".to_string();
        assert!(config.validate().is_err());
    }
}
