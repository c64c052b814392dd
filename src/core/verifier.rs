//! Disposal verifier
//!
//! Orchestrates the two-phase scan workflow:
//!
//! 1. **Verify** - resolve a scanned bin identifier and return its public
//!    fields for client display. Read-only, no side effects.
//! 2. **Settle** - resolve bin, product, and user in that order, check
//!    that the bin accepts the product's material, then append one
//!    completed reward entry and credit the user's wallet as a single
//!    logical effect.
//!
//! Resolution failures short-circuit in resolution order, so a request
//! with both an unknown bin and an unknown product reports the bin.

use crate::core::catalog::ProductCatalog;
use crate::core::directory::UserDirectory;
use crate::core::ledger::WalletLedger;
use crate::core::registry::BinRegistry;
use crate::types::{
    BinLocation, RecordId, RecyclableType, RewardsError, TransactionDraft, TransactionMetadata,
    TransactionStatus, TransactionType,
};
use rust_decimal::Decimal;
use tracing::debug;

/// Public bin fields returned by the verify phase
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct VerifiedBin {
    pub bin_id: String,
    pub location: BinLocation,
    pub accepted_types: Vec<RecyclableType>,
}

/// Outcome of a successful settlement
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SettlementReceipt {
    /// Amount credited to the wallet
    pub reward: Decimal,
    /// Display name of the bin's location
    pub bin_location: String,
    pub product_name: String,
}

/// The scan-cycle orchestrator
///
/// Cloneable; clones share the same underlying collections.
#[derive(Debug, Clone)]
pub struct DisposalVerifier {
    registry: BinRegistry,
    catalog: ProductCatalog,
    directory: UserDirectory,
    ledger: WalletLedger,
}

impl DisposalVerifier {
    /// Create a verifier over the shared component views
    pub fn new(
        registry: BinRegistry,
        catalog: ProductCatalog,
        directory: UserDirectory,
        ledger: WalletLedger,
    ) -> Self {
        DisposalVerifier {
            registry,
            catalog,
            directory,
            ledger,
        }
    }

    /// Verify a scanned bin identifier
    ///
    /// Returns the bin's public fields, or `BinNotFound` when the
    /// identifier is unknown or the bin is inactive. Never writes.
    pub fn verify(&self, bin_id: &str) -> Result<VerifiedBin, RewardsError> {
        if bin_id.is_empty() {
            return Err(RewardsError::missing_field("binId"));
        }

        let bin = self
            .registry
            .resolve(bin_id)
            .ok_or_else(|| RewardsError::bin_not_found(bin_id))?;

        Ok(VerifiedBin {
            bin_id: bin.bin_id,
            location: bin.location,
            accepted_types: bin.accepted_types,
        })
    }

    /// Settle a disposal: validate eligibility, then reward the user
    ///
    /// Resolution order and short-circuit failures: bin, then product,
    /// then user, then eligibility. On success exactly one completed
    /// reward entry is appended with a metadata snapshot and the wallet is
    /// credited by `product.reward_amount`; both effects happen inside
    /// one per-user critical section.
    pub fn settle(
        &self,
        bin_id: &str,
        product_id: &RecordId,
        user_id: &RecordId,
    ) -> Result<SettlementReceipt, RewardsError> {
        if bin_id.is_empty() {
            return Err(RewardsError::missing_field("binId"));
        }

        let bin = self
            .registry
            .resolve(bin_id)
            .ok_or_else(|| RewardsError::bin_not_found(bin_id))?;

        let product = self
            .catalog
            .resolve(product_id)
            .ok_or_else(|| RewardsError::product_not_found(*product_id))?;

        let user = self
            .directory
            .get(user_id)
            .ok_or_else(|| RewardsError::user_not_found(*user_id))?;

        if !bin.accepts(product.recyclable_type) {
            return Err(RewardsError::material_mismatch(
                product.recyclable_type,
                bin.accepted_types.clone(),
            ));
        }

        let draft = TransactionDraft {
            user_id: user.id,
            product_id: product.id,
            bin_id: bin.id,
            tx_type: TransactionType::Reward,
            amount: product.reward_amount,
            description: format!("Reward for recycling {}", product.name),
            status: TransactionStatus::Completed,
            metadata: TransactionMetadata {
                product_name: Some(product.name.clone()),
                bin_location: Some(bin.location.name.clone()),
                recyclable_type: Some(product.recyclable_type),
            },
        };

        let (transaction, credited) = self.ledger.append_and_credit(draft)?;

        debug!(
            user = %credited.id,
            bin = %bin.bin_id,
            transaction = %transaction.id,
            reward = %transaction.amount,
            "disposal settled"
        );

        Ok(SettlementReceipt {
            reward: transaction.amount,
            bin_location: bin.location.name,
            product_name: product.name,
        })
    }
}
