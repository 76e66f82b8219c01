//! Configuration types for the modstatus client

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main client configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ModstatusConfig {
    /// Connection settings for the monitored server
    #[serde(default)]
    pub fetch: FetchConfig,
}

/// Connection parameters for the status endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Target server address (host or host:port)
    #[serde(default = "default_target")]
    pub target: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            target: default_target(),
            timeout_secs: default_timeout(),
        }
    }
}

// Default value functions
fn default_target() -> String {
    "localhost".to_string()
}

fn default_timeout() -> u64 {
    10
}

impl ModstatusConfig {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(e.to_string()))?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Save configuration to a TOML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;
        std::fs::write(path.as_ref(), content)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;
        Ok(())
    }

    /// Convert to TOML string
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::SerializeError(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fetch.target.is_empty() {
            return Err(ConfigError::ValidationError(
                "target cannot be empty".to_string(),
            ));
        }

        if self.fetch.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "timeout_secs cannot be 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ModstatusConfig::default();
        assert_eq!(config.fetch.target, "localhost");
        assert_eq!(config.fetch.timeout_secs, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[fetch]
target = "status.example.net:8080"
timeout_secs = 3
"#;

        let config = ModstatusConfig::from_toml(toml).unwrap();
        assert_eq!(config.fetch.target, "status.example.net:8080");
        assert_eq!(config.fetch.timeout_secs, 3);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = ModstatusConfig::from_toml("[fetch]\ntarget = \"web01\"\n").unwrap();
        assert_eq!(config.fetch.target, "web01");
        assert_eq!(config.fetch.timeout_secs, 10);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = ModstatusConfig::default();
        config.fetch.target = String::new();
        assert!(config.validate().is_err());

        let mut config = ModstatusConfig::default();
        config.fetch.timeout_secs = 0;
        assert!(config.validate().is_err());
    }
}
