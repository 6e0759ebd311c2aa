//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Resolver + handlers produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!     → spans.rs   (per-resolution span trees)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//!     → Span exporter (log-based by default, in-memory for tests)
//! ```
//!
//! # Design Decisions
//! - One sink per concern, constructed explicitly and passed into the
//!   resolver — no ambient global telemetry state
//! - Metric updates are atomic; sinks tolerate concurrent resolutions
//! - Span handles are owned by one resolution and closed on every exit path

pub mod logging;
pub mod metrics;
pub mod spans;

pub use metrics::{InMemorySink, MetricsSink, PrometheusSink};
pub use spans::{
    InMemoryExporter, LogExporter, SpanExporter, SpanHandle, SpanRecord, Tracer,
};
