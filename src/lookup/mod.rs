//! The remote-call boundary for catalog lookups.
//!
//! Both resolver stages go through this boundary so transport faults stay
//! isolated from in-process logic errors. "Not found" is not a fault; it is
//! the `Ok(None)` case.
//!
//! The reference deployment the service replaces resolved via a loopback
//! HTTP hop into its own catalog endpoints. The default here is the direct
//! in-process transport; the HTTP transport remains available for genuinely
//! remote catalogs.

pub mod direct;
pub mod http;

use std::future::Future;

use crate::catalog::{SupplierRecord, VendorId, VendorRecord};

pub use direct::DirectTransport;
pub use http::HttpTransport;

/// Error raised by a lookup transport.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status {0} from catalog endpoint")]
    Status(u16),

    #[error("lookup deadline exceeded")]
    DeadlineExceeded,
}

/// One request per lookup call.
pub trait CatalogClient: Send + Sync {
    /// Look up the supplier record for a food.
    fn fetch_supplier(
        &self,
        food: &str,
    ) -> impl Future<Output = Result<Option<SupplierRecord>, LookupError>> + Send;

    /// Look up a vendor's price record.
    fn fetch_vendor(
        &self,
        id: VendorId,
    ) -> impl Future<Output = Result<Option<VendorRecord>, LookupError>> + Send;
}

/// Transport selected from configuration.
pub enum CatalogTransport {
    Direct(DirectTransport),
    Http(HttpTransport),
}

impl CatalogClient for CatalogTransport {
    async fn fetch_supplier(&self, food: &str) -> Result<Option<SupplierRecord>, LookupError> {
        match self {
            Self::Direct(transport) => transport.fetch_supplier(food).await,
            Self::Http(transport) => transport.fetch_supplier(food).await,
        }
    }

    async fn fetch_vendor(&self, id: VendorId) -> Result<Option<VendorRecord>, LookupError> {
        match self {
            Self::Direct(transport) => transport.fetch_vendor(id).await,
            Self::Http(transport) => transport.fetch_vendor(id).await,
        }
    }
}
