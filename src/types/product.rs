//! Product catalog types
//!
//! Defines the purchasable catalog item, its material classification, and
//! the input/patch shapes used by the admin surface.

use crate::types::{Record, RecordId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Material category a recyclable item is made of
///
/// Used to match products to the bins that accept them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecyclableType {
    Plastic,
    Glass,
    Metal,
    Paper,
    Organic,
}

impl RecyclableType {
    /// Lowercase wire name, as encoded in transaction metadata and
    /// user-facing messages
    pub fn as_str(&self) -> &'static str {
        match self {
            RecyclableType::Plastic => "plastic",
            RecyclableType::Glass => "glass",
            RecyclableType::Metal => "metal",
            RecyclableType::Paper => "paper",
            RecyclableType::Organic => "organic",
        }
    }
}

impl fmt::Display for RecyclableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shelf category of a catalog item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Beverage,
    Food,
    Packaging,
    Other,
}

/// A purchasable catalog item carrying its recycling reward
///
/// `reward_percentage` is a snapshot computed from `reward_amount / price`
/// at creation time. It is not recalculated when the price is later edited;
/// see the catalog module for how the snapshot is produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Store-assigned record identity
    pub id: RecordId,
    pub name: String,
    pub description: String,
    /// Retail price in currency units
    pub price: Decimal,
    /// Fixed reward credited per disposal
    pub reward_amount: Decimal,
    /// Percentage-of-price snapshot taken at creation (2 decimal places)
    pub reward_percentage: Decimal,
    pub category: Category,
    /// Material the packaging is made of, matched against bin accepted sets
    pub recyclable_type: RecyclableType,
    pub image_url: Option<String>,
    /// Inactive products stay listed for admins but are filterable out
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Build an unsaved product from admin input and the percentage snapshot
    ///
    /// Identity and timestamps are placeholders until the store persists
    /// the record. New products start active.
    pub fn new(input: ProductInput, reward_percentage: Decimal) -> Self {
        Product {
            id: RecordId::nil(),
            name: input.name,
            description: input.description,
            price: input.price,
            reward_amount: input.reward_amount,
            reward_percentage,
            category: input.category,
            recyclable_type: input.recyclable_type,
            image_url: input.image_url,
            active: true,
            created_at: DateTime::UNIX_EPOCH,
            updated_at: DateTime::UNIX_EPOCH,
        }
    }

    /// Merge a partial update into this product
    ///
    /// Only fields present in the patch are overwritten. The
    /// `reward_percentage` snapshot is deliberately left untouched even
    /// when `price` or `reward_amount` change.
    pub fn merge(&mut self, patch: ProductPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(reward_amount) = patch.reward_amount {
            self.reward_amount = reward_amount;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(recyclable_type) = patch.recyclable_type {
            self.recyclable_type = recyclable_type;
        }
        if let Some(image_url) = patch.image_url {
            self.image_url = Some(image_url);
        }
        if let Some(active) = patch.active {
            self.active = active;
        }
    }
}

impl Record for Product {
    fn id(&self) -> RecordId {
        self.id
    }

    fn assign(&mut self, id: RecordId, now: DateTime<Utc>) {
        self.id = id;
        self.created_at = now;
        self.updated_at = now;
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

/// Admin input for creating a product
///
/// The reward percentage is not part of the input; the catalog derives it
/// from `reward_amount` and `price` when the record is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub reward_amount: Decimal,
    pub category: Category,
    pub recyclable_type: RecyclableType,
    pub image_url: Option<String>,
}

/// Partial update for a product; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub reward_amount: Option<Decimal>,
    pub category: Option<Category>,
    pub recyclable_type: Option<RecyclableType>,
    pub image_url: Option<String>,
    pub active: Option<bool>,
}
