//! HTTP server setup and API handlers.
//!
//! # Responsibilities
//! - Create the Axum router with all handlers
//! - Wire up middleware (tracing, body limits, request ID)
//! - Construct the resolver with its lookup transport and telemetry
//! - Measure end-to-end latency around each resolution

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use url::Url;

use crate::catalog::{Catalog, SupplierRecord, VendorId, VendorRecord};
use crate::config::{ServiceConfig, TransportKind};
use crate::lookup::{CatalogTransport, DirectTransport, HttpTransport};
use crate::observability::{LogExporter, MetricsSink, PrometheusSink, Tracer};
use crate::resolver::Resolver;

/// Error constructing the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("invalid remote catalog url: {0}")]
    RemoteUrl(#[from] url::ParseError),

    #[error("failed to build lookup client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Application state injected into handlers.
#[derive(Clone)]
struct AppState {
    resolver: Arc<Resolver<CatalogTransport>>,
    catalog: Arc<Catalog>,
    metrics: Arc<dyn MetricsSink>,
    resolve_budget: Option<Duration>,
}

/// HTTP server for the price resolver.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a server with the default telemetry sinks: Prometheus-backed
    /// metrics and log-exported spans.
    pub fn new(config: ServiceConfig, catalog: Catalog) -> Result<Self, ServerError> {
        let instance = format!("price-resolver-{}", std::process::id());
        let metrics: Arc<dyn MetricsSink> = Arc::new(PrometheusSink::register(&instance));
        let tracer = Tracer::new(Arc::new(LogExporter));
        Self::with_telemetry(config, catalog, metrics, tracer)
    }

    /// Create a server with explicit telemetry. Tests use this to observe
    /// the samples a request produces.
    pub fn with_telemetry(
        config: ServiceConfig,
        catalog: Catalog,
        metrics: Arc<dyn MetricsSink>,
        tracer: Tracer,
    ) -> Result<Self, ServerError> {
        let catalog = Arc::new(catalog);

        let transport = match config.catalog.transport {
            TransportKind::Direct => {
                CatalogTransport::Direct(DirectTransport::new(catalog.clone()))
            }
            TransportKind::Http => {
                let base = Url::parse(&config.catalog.remote_base_url)?;
                let timeout = Duration::from_millis(config.timeouts.lookup_ms);
                CatalogTransport::Http(HttpTransport::new(base, timeout)?)
            }
        };

        let resolver = Arc::new(Resolver::new(transport, metrics.clone(), tracer));
        let state = AppState {
            resolver,
            catalog,
            metrics,
            resolve_budget: config.timeouts.resolve_budget_ms.map(Duration::from_millis),
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        Router::new()
            .route("/", get(index))
            .route("/health", get(health))
            .route("/api/vendors", post(resolve_prices))
            .route("/api/vendors/{food}", get(find_suppliers))
            .route("/api/prices/{vendor}", get(find_vendor_prices))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(RequestBodyLimitLayer::new(config.listener.max_body_bytes))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}

#[derive(Debug, Deserialize)]
struct ResolveRequest {
    food: String,
}

/// Inbound resolution endpoint.
///
/// End-to-end latency is measured here, around the resolver call; an empty
/// result is a successfully handled response, not an error.
async fn resolve_prices(
    State(state): State<AppState>,
    Json(request): Json<ResolveRequest>,
) -> Json<crate::resolver::Resolution> {
    let start = Instant::now();
    let deadline = state.resolve_budget.map(|budget| start + budget);

    let resolution = state
        .resolver
        .resolve_with_deadline(&request.food, deadline)
        .await;

    state.metrics.record_latency(start.elapsed());
    tracing::debug!(
        food = %request.food,
        slots = resolution.len(),
        priced = resolution.priced().count(),
        "resolution served"
    );

    Json(resolution)
}

/// Catalog endpoint: supplier records matching a food.
/// Empty array on no match, single-element array on a match.
async fn find_suppliers(
    State(state): State<AppState>,
    Path(food): Path<String>,
) -> Json<Vec<SupplierRecord>> {
    let rows = state.catalog.find_supplier(&food).cloned();
    Json(rows.into_iter().collect())
}

/// Catalog endpoint: vendor records matching an ID.
/// A non-numeric ID matches nothing rather than failing the request.
async fn find_vendor_prices(
    State(state): State<AppState>,
    Path(vendor): Path<String>,
) -> Json<Vec<VendorRecord>> {
    let rows = vendor
        .trim()
        .parse::<VendorId>()
        .ok()
        .and_then(|id| state.catalog.find_vendor(id).cloned());
    Json(rows.into_iter().collect())
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn index() -> &'static str {
    "price-resolver"
}
