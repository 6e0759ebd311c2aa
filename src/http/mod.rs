//! HTTP surface: the inbound resolution API and the catalog endpoints.
//!
//! # Endpoints
//! - `POST /api/vendors` — resolve a food to per-vendor price records
//! - `GET /api/vendors/{food}` — supplier records matching a food
//! - `GET /api/prices/{vendor}` — vendor records matching an ID
//! - `GET /health` — liveness probe

pub mod server;

pub use server::{HttpServer, ServerError};
