//! In-process transport backed by the catalog store.

use std::sync::Arc;

use crate::catalog::{Catalog, SupplierRecord, VendorId, VendorRecord};
use crate::lookup::{CatalogClient, LookupError};

/// Calls the catalog store directly. Cannot fail at the transport level.
pub struct DirectTransport {
    catalog: Arc<Catalog>,
}

impl DirectTransport {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }
}

impl CatalogClient for DirectTransport {
    async fn fetch_supplier(&self, food: &str) -> Result<Option<SupplierRecord>, LookupError> {
        Ok(self.catalog.find_supplier(food).cloned())
    }

    async fn fetch_vendor(&self, id: VendorId) -> Result<Option<VendorRecord>, LookupError> {
        Ok(self.catalog.find_vendor(id).cloned())
    }
}
