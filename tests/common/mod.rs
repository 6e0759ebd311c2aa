//! Shared utilities for integration tests.

use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use price_resolver::catalog::Catalog;
use price_resolver::config::ServiceConfig;
use price_resolver::http::HttpServer;
use price_resolver::lifecycle::Shutdown;
use price_resolver::observability::{InMemoryExporter, InMemorySink, Tracer};

/// A service instance bound to an ephemeral port, with in-memory telemetry
/// sinks the test can inspect.
pub struct TestService {
    pub base_url: String,
    pub metrics: Arc<InMemorySink>,
    pub spans: Arc<InMemoryExporter>,
    shutdown: Shutdown,
}

impl TestService {
    /// Boot the service with the sample catalog.
    pub async fn spawn(config: ServiceConfig) -> Self {
        Self::spawn_with_catalog(config, Catalog::sample()).await
    }

    pub async fn spawn_with_catalog(config: ServiceConfig, catalog: Catalog) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let metrics = Arc::new(InMemorySink::new());
        let spans = Arc::new(InMemoryExporter::new());
        let tracer = Tracer::new(spans.clone());

        let server =
            HttpServer::with_telemetry(config, catalog, metrics.clone(), tracer).unwrap();

        let shutdown = Shutdown::new();
        let rx = shutdown.subscribe();
        tokio::spawn(async move {
            let _ = server.run(listener, rx).await;
        });
        tokio::time::sleep(Duration::from_millis(50)).await;

        Self {
            base_url: format!("http://{addr}"),
            metrics,
            spans,
            shutdown,
        }
    }

    pub fn stop(&self) {
        self.shutdown.trigger();
    }
}

/// A client that never routes through a local proxy.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
