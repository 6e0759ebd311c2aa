//! Configuration loading from disk.

use std::path::Path;

use crate::config::schema::ServiceConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ServiceConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: ServiceConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::TransportKind;

    #[test]
    fn parses_a_partial_toml_document() {
        let toml = r#"
            [listener]
            bind_address = "127.0.0.1:3100"

            [catalog]
            transport = "http"
            remote_base_url = "http://127.0.0.1:3000"

            [timeouts]
            resolve_budget_ms = 250
        "#;
        let config: ServiceConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:3100");
        assert_eq!(config.catalog.transport, TransportKind::Http);
        assert_eq!(config.timeouts.resolve_budget_ms, Some(250));
        // Untouched sections keep their defaults.
        assert_eq!(config.timeouts.request_secs, 30);
        assert!(config.observability.metrics_enabled);

        assert!(validate_config(&config).is_ok());
    }
}
