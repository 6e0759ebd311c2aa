//! Configuration subsystem.

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    CatalogConfig, ListenerConfig, ObservabilityConfig, ServiceConfig, TimeoutConfig,
    TransportKind,
};
pub use validation::{validate_config, ValidationError};
