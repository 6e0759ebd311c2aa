//! Resolution result types.

use serde::{Serialize, Serializer};

use crate::catalog::{VendorId, VendorRecord};

/// Outcome of one vendor's price lookup.
///
/// Serializes as the vendor record on success and as `null` otherwise, so a
/// response always carries one slot per vendor ID from stage 1.
#[derive(Debug, Clone, PartialEq)]
pub enum VendorQuote {
    /// The vendor's price record.
    Priced(VendorRecord),
    /// The vendor ID had no record in the catalog.
    Unknown(VendorId),
    /// The lookup failed at the transport boundary.
    Failed(VendorId),
}

impl VendorQuote {
    pub fn vendor_id(&self) -> VendorId {
        match self {
            Self::Priced(record) => record.id,
            Self::Unknown(id) | Self::Failed(id) => *id,
        }
    }

    pub fn record(&self) -> Option<&VendorRecord> {
        match self {
            Self::Priced(record) => Some(record),
            _ => None,
        }
    }

    pub fn is_priced(&self) -> bool {
        matches!(self, Self::Priced(_))
    }
}

impl Serialize for VendorQuote {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Priced(record) => record.serialize(serializer),
            Self::Unknown(_) | Self::Failed(_) => serializer.serialize_none(),
        }
    }
}

/// Ordered per-vendor outcomes for one resolution.
///
/// Slot order always follows the supplier's vendor list, never completion
/// order. Empty is a valid outcome (food unknown, or empty vendor list),
/// distinct from a failure.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    pub quotes: Vec<VendorQuote>,
}

impl Resolution {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Successfully priced records, in slot order.
    pub fn priced(&self) -> impl Iterator<Item = &VendorRecord> {
        self.quotes.iter().filter_map(VendorQuote::record)
    }
}

impl Serialize for Resolution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.quotes.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn failed_slots_serialize_as_null() {
        let catalog = Catalog::sample();
        let resolution = Resolution {
            quotes: vec![
                VendorQuote::Priced(catalog.find_vendor(1).unwrap().clone()),
                VendorQuote::Failed(3),
                VendorQuote::Unknown(9),
            ],
        };

        let json = serde_json::to_value(&resolution).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"id": 1, "inventory": {"apple": 1.5, "grape": 2.5}},
                null,
                null
            ])
        );
    }

    #[test]
    fn empty_resolution_serializes_as_empty_array() {
        let json = serde_json::to_value(Resolution::empty()).unwrap();
        assert_eq!(json, serde_json::json!([]));
    }
}
