//! Resolution metrics.
//!
//! # Metrics
//! - `request_count` (counter): inbound resolutions
//! - `errors` (counter): unrecoverable lookup failures
//! - `task_latency` (histogram): end-to-end resolution latency in ms
//! - `vendor_response_count` (histogram): vendor IDs returned by stage 1
//!
//! The sinks record raw samples only; bucketing is the exporter's concern.
//! Every sample is labeled with a process instance identifier.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use metrics::{counter, histogram, Counter, Histogram};
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder};

use crate::config::schema::ObservabilityConfig;

/// Sink for resolution metric events.
///
/// Implementations must tolerate concurrent recording from multiple in-flight
/// resolutions without lost updates.
pub trait MetricsSink: Send + Sync {
    /// One inbound resolution.
    fn incr_request_count(&self);

    /// One unrecoverable lookup failure.
    fn incr_error_count(&self);

    /// Vendor-ID count from stage 1; one sample per resolution.
    fn record_response_count(&self, count: usize);

    /// End-to-end wall-clock latency; one sample per resolution.
    fn record_latency(&self, elapsed: Duration);
}

/// Forwards samples into the `metrics` registry, scraped by the Prometheus
/// exporter installed at startup.
pub struct PrometheusSink {
    request_count: Counter,
    errors: Counter,
    task_latency: Histogram,
    vendor_response_count: Histogram,
}

impl PrometheusSink {
    /// Register the resolver metrics, labeled with this process instance.
    pub fn register(instance: &str) -> Self {
        Self {
            request_count: counter!("request_count", "instance" => instance.to_owned()),
            errors: counter!("errors", "instance" => instance.to_owned()),
            task_latency: histogram!("task_latency", "instance" => instance.to_owned()),
            vendor_response_count: histogram!(
                "vendor_response_count",
                "instance" => instance.to_owned()
            ),
        }
    }
}

impl MetricsSink for PrometheusSink {
    fn incr_request_count(&self) {
        self.request_count.increment(1);
    }

    fn incr_error_count(&self) {
        self.errors.increment(1);
    }

    fn record_response_count(&self, count: usize) {
        self.vendor_response_count.record(count as f64);
    }

    fn record_latency(&self, elapsed: Duration) {
        self.task_latency.record(elapsed.as_secs_f64() * 1000.0);
    }
}

/// Accumulates raw samples in memory. Used by tests and diagnostics.
#[derive(Debug, Default)]
pub struct InMemorySink {
    requests: AtomicU64,
    errors: AtomicU64,
    response_counts: Mutex<Vec<u64>>,
    latencies_ms: Mutex<Vec<f64>>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> u64 {
        self.requests.load(Ordering::Relaxed)
    }

    pub fn errors(&self) -> u64 {
        self.errors.load(Ordering::Relaxed)
    }

    pub fn response_counts(&self) -> Vec<u64> {
        self.response_counts.lock().unwrap().clone()
    }

    pub fn latencies_ms(&self) -> Vec<f64> {
        self.latencies_ms.lock().unwrap().clone()
    }
}

impl MetricsSink for InMemorySink {
    fn incr_request_count(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    fn incr_error_count(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    fn record_response_count(&self, count: usize) {
        self.response_counts.lock().unwrap().push(count as u64);
    }

    fn record_latency(&self, elapsed: Duration) {
        self.latencies_ms
            .lock()
            .unwrap()
            .push(elapsed.as_secs_f64() * 1000.0);
    }
}

/// Install the Prometheus exporter with its scrape listener and the
/// configured histogram bucket boundaries.
pub fn init_metrics(addr: SocketAddr, config: &ObservabilityConfig) -> Result<(), BuildError> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .set_buckets_for_metric(
            Matcher::Full("task_latency".to_string()),
            &config.latency_buckets_ms,
        )?
        .set_buckets_for_metric(
            Matcher::Full("vendor_response_count".to_string()),
            &config.response_count_buckets,
        )?
        .install()
}
