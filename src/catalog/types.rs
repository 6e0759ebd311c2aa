//! Catalog record definitions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Vendor identifier, unique within the vendor catalog.
pub type VendorId = u32;

/// Which vendors stock a food.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierRecord {
    pub food: String,
    /// Vendor IDs in supplier order; resolution results preserve this order.
    pub vendors: Vec<VendorId>,
}

/// The prices a vendor lists, keyed by food name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorRecord {
    pub id: VendorId,
    pub inventory: BTreeMap<String, f64>,
}

impl VendorRecord {
    /// Price this vendor lists for a food, if any.
    pub fn price_of(&self, food: &str) -> Option<f64> {
        self.inventory.get(food).copied()
    }
}
