//! Configuration validation.

use std::fmt;
use std::net::SocketAddr;

use url::Url;

use crate::config::schema::{ServiceConfig, TransportKind};

/// A single validation failure.
#[derive(Debug)]
pub enum ValidationError {
    BindAddress(String),
    MetricsAddress(String),
    RemoteBaseUrl(String),
    EmptyLatencyBuckets,
    EmptyResponseCountBuckets,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BindAddress(addr) => write!(f, "invalid bind address {addr:?}"),
            Self::MetricsAddress(addr) => write!(f, "invalid metrics address {addr:?}"),
            Self::RemoteBaseUrl(url) => write!(f, "invalid remote catalog url {url:?}"),
            Self::EmptyLatencyBuckets => write!(f, "latency_buckets_ms must not be empty"),
            Self::EmptyResponseCountBuckets => {
                write!(f, "response_count_buckets must not be empty")
            }
        }
    }
}

/// Check a configuration for problems that would fail at runtime.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if config.catalog.transport == TransportKind::Http
        && Url::parse(&config.catalog.remote_base_url).is_err()
    {
        errors.push(ValidationError::RemoteBaseUrl(
            config.catalog.remote_base_url.clone(),
        ));
    }

    if config.observability.latency_buckets_ms.is_empty() {
        errors.push(ValidationError::EmptyLatencyBuckets);
    }
    if config.observability.response_count_buckets.is_empty() {
        errors.push(ValidationError::EmptyResponseCountBuckets);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&ServiceConfig::default()).is_ok());
    }

    #[test]
    fn rejects_bad_addresses() {
        let mut config = ServiceConfig::default();
        config.listener.bind_address = "not-an-address".to_string();
        config.observability.metrics_address = "also:not:an:address".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(matches!(errors[0], ValidationError::BindAddress(_)));
        assert!(matches!(errors[1], ValidationError::MetricsAddress(_)));
    }

    #[test]
    fn remote_url_is_only_checked_for_http_transport() {
        let mut config = ServiceConfig::default();
        config.catalog.remote_base_url = "::bogus::".to_string();
        assert!(validate_config(&config).is_ok());

        config.catalog.transport = TransportKind::Http;
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(errors[0], ValidationError::RemoteBaseUrl(_)));
    }

    #[test]
    fn rejects_empty_histogram_buckets() {
        let mut config = ServiceConfig::default();
        config.observability.latency_buckets_ms.clear();
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(errors[0], ValidationError::EmptyLatencyBuckets));
    }
}
