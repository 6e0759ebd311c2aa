//! Static food/vendor reference data.
//!
//! # Responsibilities
//! - Define the supplier (food → vendor IDs) and vendor (ID → inventory) records
//! - Load the catalog from a JSON file, or fall back to the built-in dataset
//! - Serve exact-match lookups for both tables
//!
//! # Design Decisions
//! - Loaded once at startup, immutable afterwards (shared via `Arc`, no locks)
//! - Food matching is exact and case-sensitive
//! - Tables are tiny; linear scans keep the lookup semantics obvious

pub mod store;
pub mod types;

pub use store::{Catalog, CatalogError};
pub use types::{SupplierRecord, VendorId, VendorRecord};
