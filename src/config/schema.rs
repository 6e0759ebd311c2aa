//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from a TOML file, with
//! defaults so a missing file or section still yields a runnable service.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for the service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (bind address, body limits).
    pub listener: ListenerConfig,

    /// Catalog data source and lookup transport.
    pub catalog: CatalogConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,

    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
            max_body_bytes: 64 * 1024,
        }
    }
}

/// How resolver lookups reach the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TransportKind {
    /// In-process call into the catalog store.
    #[default]
    Direct,
    /// HTTP calls against another service's catalog endpoints.
    Http,
}

/// Catalog configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Lookup transport for the resolver.
    pub transport: TransportKind,

    /// Base URL of the remote catalog endpoints (http transport only).
    pub remote_base_url: String,

    /// Optional JSON catalog file; the built-in dataset is used when unset.
    pub data_path: Option<PathBuf>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            transport: TransportKind::Direct,
            remote_base_url: "http://127.0.0.1:3000".to_string(),
            data_path: None,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Inbound request timeout in seconds.
    pub request_secs: u64,

    /// Per-lookup timeout for the HTTP transport, in milliseconds.
    pub lookup_ms: u64,

    /// Optional total budget for one resolution, in milliseconds. Unset
    /// means no deadline is threaded through the resolver.
    pub resolve_budget_ms: Option<u64>,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 30,
            lookup_ms: 2_000,
            resolve_budget_ms: None,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus scrape endpoint.
    pub metrics_enabled: bool,

    /// Scrape endpoint bind address.
    pub metrics_address: String,

    /// Bucket boundaries for the `task_latency` histogram, in milliseconds.
    pub latency_buckets_ms: Vec<f64>,

    /// Bucket boundaries for the `vendor_response_count` histogram.
    pub response_count_buckets: Vec<f64>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
            latency_buckets_ms: vec![0.0, 10.0, 20.0, 40.0, 100.0, 200.0, 400.0],
            response_count_buckets: vec![0.0, 1.0, 2.0, 3.0, 4.0, 8.0, 16.0],
        }
    }
}
