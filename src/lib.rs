//! Instrumented food-price resolution service.
//!
//! Resolves a food name to the price records of every vendor stocking it,
//! through two dependent lookup stages:
//!
//! ```text
//! POST /api/vendors {food}
//!         │
//!         ▼
//!     Resolver ── stage 1 ──▶ supplier lookup (food → vendor IDs)
//!         │
//!         └───── stage 2 ──▶ price lookup × N (sequential, supplier order)
//! ```
//!
//! Every resolution is bracketed by a span tree (one root, one child per
//! lookup call) and accounted in process-wide counters and histograms.

pub mod catalog;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod lookup;
pub mod observability;
pub mod resolver;

pub use config::schema::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use resolver::Resolver;
