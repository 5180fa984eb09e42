//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: GatewayConfig = toml::from_str(&content).map_err(ConfigError::Parse)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_toml_round_trips() {
        let config: GatewayConfig = toml::from_str(
            r#"
            [listener]
            bind_address = "127.0.0.1:8080"

            [actions]
            enabled = true
            path = "/actions"

            [[handlers]]
            action = "upload"
            address = "127.0.0.1:9000"
            "#,
        )
        .unwrap();

        assert!(config.actions.enabled);
        assert_eq!(config.actions.path, "/actions");
        assert_eq!(config.handlers.len(), 1);
        assert_eq!(config.handlers[0].action, "upload");
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_toml_uses_defaults() {
        let config: GatewayConfig = toml::from_str("").unwrap();
        assert!(!config.actions.enabled);
        assert_eq!(config.actions.path, "/actions");
        assert_eq!(config.actions.max_body_size, 1024 * 1024);
    }
}
