//! Product catalog
//!
//! Tracks purchasable items, their price, and their fixed/percentage
//! reward. Built on the entity store specialized to products.

use crate::store::{EntityStore, MemoryStore};
use crate::types::{Category, Product, ProductInput, ProductPatch, RecordId, RewardsError};
use rust_decimal::Decimal;
use std::sync::Arc;

/// Equality filters for product listings
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductFilter {
    pub category: Option<Category>,
    pub active: Option<bool>,
}

/// Catalog of purchasable items
///
/// Cloneable view over the shared product collection.
#[derive(Debug, Clone)]
pub struct ProductCatalog {
    products: Arc<MemoryStore<Product>>,
}

impl ProductCatalog {
    /// Create a catalog over the shared product collection
    pub fn new(products: Arc<MemoryStore<Product>>) -> Self {
        ProductCatalog { products }
    }

    /// Create a product, snapshotting its reward percentage
    ///
    /// The percentage is computed exactly once here as
    /// `reward_amount / price * 100`, rounded to 2 decimal places, and
    /// persisted alongside the raw fields. Later price edits do not
    /// refresh it; see [`ProductCatalog::update`].
    pub fn create(&self, input: ProductInput) -> Product {
        let reward_percentage = percentage_snapshot(input.reward_amount, input.price);
        self.products.insert(Product::new(input, reward_percentage))
    }

    /// Fetch a single product by identity
    ///
    /// The active flag is not consulted on this path; an inactive product
    /// still resolves for settlement, matching the observed behavior of
    /// the scan flow.
    pub fn resolve(&self, id: &RecordId) -> Option<Product> {
        self.products.get(id)
    }

    /// Products matching the filter, newest-first
    pub fn list(&self, filter: ProductFilter) -> Vec<Product> {
        self.products.filter(|product| {
            if let Some(category) = filter.category {
                if product.category != category {
                    return false;
                }
            }
            if let Some(active) = filter.active {
                if product.active != active {
                    return false;
                }
            }
            true
        })
    }

    /// Apply a partial update; silent no-op when the id is absent
    ///
    /// The stored `reward_percentage` snapshot is never recomputed here,
    /// even when the patch changes `price` or `reward_amount`.
    pub fn update(
        &self,
        id: &RecordId,
        patch: ProductPatch,
    ) -> Result<Option<Product>, RewardsError> {
        self.products.update(id, |product| {
            product.merge(patch);
            Ok(())
        })
    }

    /// Remove a product, reporting whether it was present
    pub fn remove(&self, id: &RecordId) -> bool {
        self.products.remove(id)
    }
}

/// Percentage-of-price snapshot, rounded to 2 decimal places
///
/// A zero price yields a zero percentage rather than a division error.
fn percentage_snapshot(reward_amount: Decimal, price: Decimal) -> Decimal {
    if price.is_zero() {
        return Decimal::ZERO;
    }
    (reward_amount / price * Decimal::ONE_HUNDRED).round_dp(2)
}
