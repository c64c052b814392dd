//! Ledger entry types
//!
//! This module defines the immutable transaction record, the draft shape
//! used to append one, and the scan event record read from input files.

use crate::types::{Record, RecordId, RecyclableType};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Transaction kinds carried by the ledger
///
/// The observed disposal flow only ever creates `Reward` entries; the
/// `Purchase` and `Disposal` kinds exist so the ledger can represent the
/// full lifecycle of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// A product purchase (negative amounts)
    Purchase,
    /// A disposal event without a reward attached
    Disposal,
    /// Cashback credited for a verified disposal (positive amounts)
    Reward,
}

/// Settlement status of a ledger entry
///
/// `Pending` and `Failed` are represented for completeness; no transition
/// logic exists and the settlement path writes `Completed` entries only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
}

/// Snapshot of catalog state captured when the entry was written
///
/// Decouples the ledger from later catalog edits: a renamed product or a
/// moved bin does not rewrite history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionMetadata {
    pub product_name: Option<String>,
    pub bin_location: Option<String>,
    pub recyclable_type: Option<RecyclableType>,
}

/// An immutable ledger entry
///
/// Entries reference their user, product, and bin records but are never
/// mutated or deleted once appended; they carry a creation stamp only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Store-assigned record identity
    pub id: RecordId,
    pub user_id: RecordId,
    pub product_id: RecordId,
    pub bin_id: RecordId,
    pub tx_type: TransactionType,
    /// Signed amount; positive for rewards
    pub amount: Decimal,
    pub description: String,
    pub status: TransactionStatus,
    pub metadata: TransactionMetadata,
    pub created_at: DateTime<Utc>,
}

impl Record for Transaction {
    fn id(&self) -> RecordId {
        self.id
    }

    fn assign(&mut self, id: RecordId, now: DateTime<Utc>) {
        self.id = id;
        self.created_at = now;
    }

    // Ledger entries are immutable and carry no update stamp.
    fn touch(&mut self, _now: DateTime<Utc>) {}
}

/// Everything needed to append a ledger entry
///
/// The store assigns identity and the creation stamp when the draft is
/// persisted.
#[derive(Debug, Clone)]
pub struct TransactionDraft {
    pub user_id: RecordId,
    pub product_id: RecordId,
    pub bin_id: RecordId,
    pub tx_type: TransactionType,
    pub amount: Decimal,
    pub description: String,
    pub status: TransactionStatus,
    pub metadata: TransactionMetadata,
}

impl TransactionDraft {
    /// Convert into an unsaved ledger entry with placeholder identity
    pub fn into_record(self) -> Transaction {
        Transaction {
            id: RecordId::nil(),
            user_id: self.user_id,
            product_id: self.product_id,
            bin_id: self.bin_id,
            tx_type: self.tx_type,
            amount: self.amount,
            description: self.description,
            status: self.status,
            metadata: self.metadata,
            created_at: DateTime::UNIX_EPOCH,
        }
    }
}

/// A disposal scan event as submitted by a kiosk client
///
/// Carries the externally scanned bin identifier plus the product and user
/// record identities. All three are required for settlement.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanRecord {
    /// External bin identifier as encoded in the QR payload
    pub bin_id: String,
    pub product_id: RecordId,
    pub user_id: RecordId,
}
