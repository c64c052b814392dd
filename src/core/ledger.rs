//! Wallet ledger
//!
//! Append-only transaction log plus the denormalized running balance on
//! each user record. The ledger is the only code that mutates
//! `wallet_balance`.
//!
//! # Settlement atomicity
//!
//! `append` and `credit` exist separately to match the store contract, but
//! the settlement path goes through [`WalletLedger::append_and_credit`],
//! which performs both effects inside the user's entry lock: either the
//! ledger gains one entry *and* the balance moves by its amount, or
//! neither happens. Two concurrent settlements for the same user cannot
//! race the read-modify-write, and a recomputation of the balance from
//! completed reward entries always matches the cached aggregate.

use crate::store::{EntityStore, MemoryStore};
use crate::types::{
    RecordId, RewardsError, Transaction, TransactionDraft, TransactionStatus, TransactionType,
    User,
};
use rust_decimal::Decimal;
use std::sync::Arc;

/// Default number of entries returned by a history query
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Append-only ledger over the shared transaction and user collections
#[derive(Debug, Clone)]
pub struct WalletLedger {
    transactions: Arc<MemoryStore<Transaction>>,
    users: Arc<MemoryStore<User>>,
}

impl WalletLedger {
    /// Create a ledger over the shared collections
    pub fn new(
        transactions: Arc<MemoryStore<Transaction>>,
        users: Arc<MemoryStore<User>>,
    ) -> Self {
        WalletLedger {
            transactions,
            users,
        }
    }

    /// Append an immutable ledger entry
    ///
    /// Assigns a fresh identity and creation stamp. No validation that the
    /// referenced user/product/bin exist happens at this layer; that
    /// responsibility sits with the caller.
    pub fn append(&self, draft: TransactionDraft) -> Transaction {
        self.transactions.insert(draft.into_record())
    }

    /// Add `amount` to a user's wallet balance
    ///
    /// Silent no-op (returns `Ok(None)`) when the user is absent. Uses
    /// checked arithmetic; an overflow rejects the credit and leaves the
    /// balance untouched.
    pub fn credit(
        &self,
        user_id: &RecordId,
        amount: Decimal,
    ) -> Result<Option<User>, RewardsError> {
        let id = *user_id;
        self.users.update(user_id, |user| {
            user.wallet_balance = user
                .wallet_balance
                .checked_add(amount)
                .ok_or_else(|| RewardsError::arithmetic_overflow("credit", id))?;
            Ok(())
        })
    }

    /// Append a reward entry and credit its amount as one logical effect
    ///
    /// Runs under the user's entry lock: the balance is checked for
    /// overflow first, the entry is appended, then the new balance is
    /// written. A failure at any point leaves both the ledger and the
    /// balance untouched. Fails with `UserNotFound` if the user record
    /// disappeared after the caller resolved it.
    pub fn append_and_credit(
        &self,
        draft: TransactionDraft,
    ) -> Result<(Transaction, User), RewardsError> {
        let user_id = draft.user_id;
        let amount = draft.amount;
        let mut appended: Option<Transaction> = None;

        let credited = self.users.update(&user_id, |user| {
            let new_balance = user
                .wallet_balance
                .checked_add(amount)
                .ok_or_else(|| RewardsError::arithmetic_overflow("credit", user_id))?;
            appended = Some(self.transactions.insert(draft.into_record()));
            user.wallet_balance = new_balance;
            Ok(())
        })?;

        match (credited, appended) {
            (Some(user), Some(transaction)) => Ok((transaction, user)),
            _ => Err(RewardsError::user_not_found(user_id)),
        }
    }

    /// A user's transactions, most-recent-first, truncated to `limit`
    pub fn history(&self, user_id: &RecordId, limit: usize) -> Vec<Transaction> {
        let mut entries = self
            .transactions
            .filter(|transaction| transaction.user_id == *user_id);
        entries.truncate(limit);
        entries
    }

    /// Number of completed reward entries recorded for a user
    pub fn reward_count(&self, user_id: &RecordId) -> usize {
        self.transactions
            .filter(|transaction| {
                transaction.user_id == *user_id
                    && transaction.tx_type == TransactionType::Reward
                    && transaction.status == TransactionStatus::Completed
            })
            .len()
    }
}
