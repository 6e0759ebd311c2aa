//! Catalog storage and lookups.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::catalog::types::{SupplierRecord, VendorId, VendorRecord};

/// Error raised while loading or validating catalog data.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate supplier entry for {0:?}")]
    DuplicateSupplier(String),

    #[error("duplicate vendor id {0}")]
    DuplicateVendor(VendorId),

    #[error("supplier {food:?} references unknown vendor {vendor}")]
    UnknownVendor { food: String, vendor: VendorId },

    #[error("vendor {vendor} lists a negative price for {food:?}")]
    NegativePrice { vendor: VendorId, food: String },
}

/// On-disk catalog file layout.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    suppliers: Vec<SupplierRecord>,
    vendors: Vec<VendorRecord>,
}

/// The two reference tables: food → vendor IDs and vendor ID → inventory.
///
/// Immutable after construction; lookups are pure and never fail beyond
/// "not found".
#[derive(Debug, Clone)]
pub struct Catalog {
    suppliers: Vec<SupplierRecord>,
    vendors: Vec<VendorRecord>,
}

impl Catalog {
    /// Build a catalog from record lists, rejecting inconsistent data.
    pub fn new(
        suppliers: Vec<SupplierRecord>,
        vendors: Vec<VendorRecord>,
    ) -> Result<Self, CatalogError> {
        let catalog = Self { suppliers, vendors };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load a catalog from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        let file: CatalogFile = serde_json::from_str(&content)?;
        Self::new(file.suppliers, file.vendors)
    }

    /// The built-in dataset used when no catalog file is configured.
    pub fn sample() -> Self {
        let suppliers = vec![
            supplier("apple", &[1]),
            supplier("grape", &[1, 3]),
            supplier("chicken", &[2]),
            supplier("potato", &[2]),
            supplier("fish", &[3]),
        ];
        let vendors = vec![
            vendor(1, &[("apple", 1.5), ("grape", 2.5)]),
            vendor(2, &[("potato", 1.5), ("chicken", 2.5)]),
            vendor(3, &[("fish", 1.5), ("grape", 2.5)]),
        ];
        // The built-in dataset is internally consistent.
        Self { suppliers, vendors }
    }

    /// Exact, case-sensitive supplier lookup.
    pub fn find_supplier(&self, food: &str) -> Option<&SupplierRecord> {
        self.suppliers.iter().find(|s| s.food == food)
    }

    /// Vendor lookup by ID.
    pub fn find_vendor(&self, id: VendorId) -> Option<&VendorRecord> {
        self.vendors.iter().find(|v| v.id == id)
    }

    pub fn supplier_count(&self) -> usize {
        self.suppliers.len()
    }

    pub fn vendor_count(&self) -> usize {
        self.vendors.len()
    }

    fn validate(&self) -> Result<(), CatalogError> {
        for (i, supplier) in self.suppliers.iter().enumerate() {
            if self.suppliers[..i].iter().any(|s| s.food == supplier.food) {
                return Err(CatalogError::DuplicateSupplier(supplier.food.clone()));
            }
            for &vendor in &supplier.vendors {
                if self.find_vendor(vendor).is_none() {
                    return Err(CatalogError::UnknownVendor {
                        food: supplier.food.clone(),
                        vendor,
                    });
                }
            }
        }
        for (i, vendor) in self.vendors.iter().enumerate() {
            if self.vendors[..i].iter().any(|v| v.id == vendor.id) {
                return Err(CatalogError::DuplicateVendor(vendor.id));
            }
            for (food, &price) in &vendor.inventory {
                if price < 0.0 {
                    return Err(CatalogError::NegativePrice {
                        vendor: vendor.id,
                        food: food.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

fn supplier(food: &str, vendors: &[VendorId]) -> SupplierRecord {
    SupplierRecord {
        food: food.to_string(),
        vendors: vendors.to_vec(),
    }
}

fn vendor(id: VendorId, inventory: &[(&str, f64)]) -> VendorRecord {
    VendorRecord {
        id,
        inventory: inventory
            .iter()
            .map(|(food, price)| (food.to_string(), *price))
            .collect::<BTreeMap<_, _>>(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supplier_lookup_is_exact_and_case_sensitive() {
        let catalog = Catalog::sample();

        let apple = catalog.find_supplier("apple").expect("apple is stocked");
        assert_eq!(apple.vendors, vec![1]);

        assert!(catalog.find_supplier("Apple").is_none());
        assert!(catalog.find_supplier("appl").is_none());
        assert!(catalog.find_supplier("kale").is_none());
    }

    #[test]
    fn vendor_lookup_by_id() {
        let catalog = Catalog::sample();

        let v3 = catalog.find_vendor(3).expect("vendor 3 exists");
        assert_eq!(v3.price_of("fish"), Some(1.5));
        assert_eq!(v3.price_of("grape"), Some(2.5));
        assert_eq!(v3.price_of("apple"), None);

        assert!(catalog.find_vendor(42).is_none());
    }

    #[test]
    fn rejects_supplier_with_unknown_vendor() {
        let err = Catalog::new(vec![supplier("apple", &[7])], vec![vendor(1, &[("apple", 1.0)])])
            .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::UnknownVendor { vendor: 7, .. }
        ));
    }

    #[test]
    fn rejects_negative_price() {
        let err = Catalog::new(
            vec![supplier("apple", &[1])],
            vec![vendor(1, &[("apple", -0.5)])],
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::NegativePrice { vendor: 1, .. }));
    }

    #[test]
    fn rejects_duplicate_entries() {
        let err = Catalog::new(
            vec![supplier("apple", &[1]), supplier("apple", &[1])],
            vec![vendor(1, &[("apple", 1.0)])],
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateSupplier(_)));

        let err = Catalog::new(
            vec![],
            vec![vendor(1, &[("apple", 1.0)]), vendor(1, &[("grape", 2.0)])],
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateVendor(1)));
    }

    #[test]
    fn parses_catalog_file_layout() {
        let json = r#"{
            "suppliers": [{"food": "apple", "vendors": [1]}],
            "vendors": [{"id": 1, "inventory": {"apple": 1.5}}]
        }"#;
        let file: CatalogFile = serde_json::from_str(json).expect("layout parses");
        let catalog = Catalog::new(file.suppliers, file.vendors).expect("consistent");
        assert_eq!(catalog.supplier_count(), 1);
        assert_eq!(catalog.find_vendor(1).unwrap().price_of("apple"), Some(1.5));
    }
}
