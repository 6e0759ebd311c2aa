//! The two-stage resolution pipeline.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use crate::catalog::VendorId;
use crate::lookup::{CatalogClient, LookupError};
use crate::observability::{MetricsSink, SpanHandle, Tracer};
use crate::resolver::types::{Resolution, VendorQuote};

/// Orchestrates vendor discovery and the per-vendor price fan-out.
///
/// `resolve` never fails: a stage-1 miss or failure degrades to an empty
/// result, a per-vendor stage-2 failure to a failed slot. Stage-2 lookups are
/// issued strictly sequentially, one vendor at a time, in supplier order.
pub struct Resolver<C> {
    client: C,
    metrics: Arc<dyn MetricsSink>,
    tracer: Tracer,
}

impl<C: CatalogClient> Resolver<C> {
    pub fn new(client: C, metrics: Arc<dyn MetricsSink>, tracer: Tracer) -> Self {
        Self {
            client,
            metrics,
            tracer,
        }
    }

    /// Resolve with no deadline.
    pub async fn resolve(&self, food: &str) -> Resolution {
        self.resolve_with_deadline(food, None).await
    }

    /// Resolve, bounding every lookup call by the remaining deadline budget.
    ///
    /// On expiry the in-flight child span and the root span are annotated
    /// `cancelled`, the slot is marked failed, and the remaining vendors are
    /// filled in as failed slots without issuing further calls.
    pub async fn resolve_with_deadline(
        &self,
        food: &str,
        deadline: Option<Instant>,
    ) -> Resolution {
        self.metrics.incr_request_count();

        let mut root = self.tracer.root(format!("resolve:{food}"));
        root.set_attribute("food", food);

        let vendors = match self.discover_vendors(&mut root, food, deadline).await {
            Some(vendors) => vendors,
            None => {
                self.metrics.record_response_count(0);
                root.end();
                return Resolution::empty();
            }
        };
        self.metrics.record_response_count(vendors.len());
        root.set_attribute("vendor_count", vendors.len());

        let mut quotes = Vec::with_capacity(vendors.len());
        let mut expired = false;
        for id in vendors {
            if expired {
                quotes.push(VendorQuote::Failed(id));
                continue;
            }
            quotes.push(self.fetch_quote(&mut root, id, deadline, &mut expired).await);
        }

        root.end();
        Resolution { quotes }
    }

    /// Stage 1: food → vendor IDs. `None` means "return an empty resolution",
    /// whether from a catalog miss or a lookup failure.
    async fn discover_vendors(
        &self,
        root: &mut SpanHandle,
        food: &str,
        deadline: Option<Instant>,
    ) -> Option<Vec<VendorId>> {
        let mut span = root.child("vendor_discovery");
        span.set_attribute("food", food);
        match bounded(deadline, self.client.fetch_supplier(food)).await {
            Ok(Some(supplier)) => {
                span.set_attribute("vendor_count", supplier.vendors.len());
                Some(supplier.vendors)
            }
            Ok(None) => {
                span.add_event("no supplier for food");
                None
            }
            Err(LookupError::DeadlineExceeded) => {
                span.add_event("cancelled");
                root.add_event("cancelled");
                self.metrics.incr_error_count();
                None
            }
            Err(err) => {
                span.add_event(format!("lookup failed: {err}"));
                self.metrics.incr_error_count();
                None
            }
        }
    }

    /// Stage 2, one vendor: ID → price record. Failures stay in their slot
    /// and never abort the remaining vendors.
    async fn fetch_quote(
        &self,
        root: &mut SpanHandle,
        id: VendorId,
        deadline: Option<Instant>,
        expired: &mut bool,
    ) -> VendorQuote {
        let mut span = root.child("price_lookup");
        span.set_attribute("vendor", id);
        match bounded(deadline, self.client.fetch_vendor(id)).await {
            Ok(Some(record)) => VendorQuote::Priced(record),
            Ok(None) => {
                span.add_event("vendor not in catalog");
                VendorQuote::Unknown(id)
            }
            Err(LookupError::DeadlineExceeded) => {
                span.add_event("cancelled");
                root.add_event(format!("vendor {id} lookup cancelled"));
                self.metrics.incr_error_count();
                *expired = true;
                VendorQuote::Failed(id)
            }
            Err(err) => {
                span.add_event(format!("lookup failed: {err}"));
                root.add_event(format!("vendor {id} lookup failed"));
                self.metrics.incr_error_count();
                VendorQuote::Failed(id)
            }
        }
    }
}

/// Run a lookup future, cut off at the deadline if one is set.
async fn bounded<T>(
    deadline: Option<Instant>,
    fut: impl Future<Output = Result<T, LookupError>>,
) -> Result<T, LookupError> {
    match deadline {
        None => fut.await,
        Some(at) => match tokio::time::timeout_at(at.into(), fut).await {
            Ok(result) => result,
            Err(_) => Err(LookupError::DeadlineExceeded),
        },
    }
}
