//! HTTP transport against the catalog endpoints of a remote service.

use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use crate::catalog::{SupplierRecord, VendorId, VendorRecord};
use crate::lookup::{CatalogClient, LookupError};

/// Calls `GET {base}/api/vendors/{food}` and `GET {base}/api/prices/{vendor}`.
///
/// The endpoints return a JSON array: empty on no match, single-element on a
/// match. The per-request timeout is enforced by the underlying client and
/// surfaces as a transport error.
pub struct HttpTransport {
    client: reqwest::Client,
    base: String,
}

impl HttpTransport {
    pub fn new(base: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .no_proxy()
            .build()?;
        Ok(Self {
            client,
            base: base.as_str().trim_end_matches('/').to_string(),
        })
    }

    async fn fetch_rows<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, LookupError> {
        let response = self.client.get(format!("{}{path}", self.base)).send().await?;
        if !response.status().is_success() {
            return Err(LookupError::Status(response.status().as_u16()));
        }
        Ok(response.json().await?)
    }
}

impl CatalogClient for HttpTransport {
    async fn fetch_supplier(&self, food: &str) -> Result<Option<SupplierRecord>, LookupError> {
        let rows: Vec<SupplierRecord> = self.fetch_rows(&format!("/api/vendors/{food}")).await?;
        Ok(rows.into_iter().next())
    }

    async fn fetch_vendor(&self, id: VendorId) -> Result<Option<VendorRecord>, LookupError> {
        let rows: Vec<VendorRecord> = self.fetch_rows(&format!("/api/prices/{id}")).await?;
        Ok(rows.into_iter().next())
    }
}
