//! The two-stage resolution core.
//!
//! # Responsibilities
//! - Discover the vendor IDs stocking a food (stage 1)
//! - Fetch each vendor's price record, sequentially, in supplier order (stage 2)
//! - Isolate per-vendor failures; never raise to the caller
//! - Bracket the whole operation in a span tree and emit metric events

pub mod engine;
pub mod types;

pub use engine::Resolver;
pub use types::{Resolution, VendorQuote};
