//! Core data types for the Eco Rewards Engine
//!
//! The four record families (users, products, bins, transactions), the
//! error taxonomy, and the identity/stamping contract every stored record
//! satisfies.

pub mod bin;
pub mod error;
pub mod product;
pub mod transaction;
pub mod user;

pub use bin::{Bin, BinInput, BinLocation, BinPatch, Coordinates};
pub use error::RewardsError;
pub use product::{Category, Product, ProductInput, ProductPatch, RecyclableType};
pub use transaction::{
    ScanRecord, Transaction, TransactionDraft, TransactionMetadata, TransactionStatus,
    TransactionType,
};
pub use user::{Role, User, UserInput, UserProfile};

use chrono::{DateTime, Utc};

/// Store-assigned record identity
///
/// Distinct from any external identifier a record may also carry (a bin's
/// `bin_id`, a user's email).
pub type RecordId = uuid::Uuid;

/// Identity and timestamp contract for stored records
///
/// The entity store calls `assign` exactly once when a record is first
/// persisted and `touch` after every successful partial update. Immutable
/// records may implement `touch` as a no-op.
pub trait Record: Clone + Send + Sync + 'static {
    /// The record's store-assigned identity
    fn id(&self) -> RecordId;

    /// Stamp identity and creation/update times on first persist
    fn assign(&mut self, id: RecordId, now: DateTime<Utc>);

    /// Refresh the update stamp after a partial update
    fn touch(&mut self, now: DateTime<Utc>);
}
