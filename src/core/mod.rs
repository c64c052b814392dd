//! Core business logic module
//!
//! The component views over the shared collections:
//! - `registry` - Bin registration and scan-path resolution
//! - `catalog` - Product catalog with reward percentage snapshots
//! - `directory` - Accounts, registration, credential checks
//! - `ledger` - Append-only transaction log and wallet balances
//! - `verifier` - The verify/settle scan workflow
//! - `service` - The assembled engine and request boundary

pub mod catalog;
pub mod directory;
pub mod ledger;
pub mod registry;
pub mod service;
pub mod verifier;

pub use catalog::{ProductCatalog, ProductFilter};
pub use directory::UserDirectory;
pub use ledger::{WalletLedger, DEFAULT_HISTORY_LIMIT};
pub use registry::BinRegistry;
pub use service::{
    AdminListing, ResourceKind, RewardsService, WalletStatement, WalletSummary,
};
pub use verifier::{DisposalVerifier, SettlementReceipt, VerifiedBin};
