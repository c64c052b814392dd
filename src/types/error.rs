//! Error types for the Eco Rewards Engine
//!
//! This module defines all failures that can surface while handling a
//! rewards operation. Every failure is caught at the request boundary and
//! classified into an HTTP-style status; no retries are attempted anywhere.
//!
//! # Error Categories
//!
//! - **Bad request**: missing/invalid required fields, unknown resource kinds
//! - **Not found**: bin/product/user absent (or bin inactive)
//! - **Conflict**: duplicate email on registration
//! - **Unauthorized**: credential mismatch on login
//! - **Material mismatch**: business-rule rejection carrying the bin's
//!   accepted set so the client can explain the rejection
//! - **Internal**: arithmetic overflow or unexpected store-layer failure

use crate::types::{RecordId, RecyclableType};
use thiserror::Error;

/// Main error type for the rewards engine
///
/// Each variant includes the context needed to build a structured error
/// response without exposing internals to the caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RewardsError {
    /// A required request field was missing or empty
    #[error("{field} is required")]
    MissingField {
        /// Name of the missing field as the client knows it
        field: &'static str,
    },

    /// No active bin matches the scanned external identifier
    #[error("Invalid or inactive bin '{bin_id}'")]
    BinNotFound {
        /// The external bin identifier that failed to resolve
        bin_id: String,
    },

    /// No product matches the given identifier
    #[error("Invalid or inactive product '{id}'")]
    ProductNotFound {
        /// The product record identifier
        id: RecordId,
    },

    /// No user matches the given identifier
    #[error("User '{id}' not found")]
    UserNotFound {
        /// The user record identifier
        id: RecordId,
    },

    /// The bin does not accept the product's material type
    ///
    /// Carries the bin's accepted set so the caller can tell the user
    /// where the item should go instead.
    #[error("This bin does not accept {material} items")]
    MaterialMismatch {
        /// Material type of the scanned product
        material: RecyclableType,
        /// Material types the bin actually accepts
        accepted: Vec<RecyclableType>,
    },

    /// An account with this email already exists
    #[error("User already exists")]
    EmailTaken {
        /// The email that was already registered
        email: String,
    },

    /// Login credentials did not match any account
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Unknown resource kind discriminator on an admin operation
    #[error("Invalid type '{kind}'")]
    InvalidResourceKind {
        /// The discriminator string that was rejected
        kind: String,
    },

    /// A wallet balance operation would overflow
    ///
    /// The settlement is rejected and neither the ledger nor the balance
    /// is touched.
    #[error("Arithmetic overflow in {operation} for user {user}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// User whose wallet was being mutated
        user: RecordId,
    },

    /// Unexpected failure in the store layer
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the failure, not shown to end users
        message: String,
    },
}

impl RewardsError {
    /// HTTP-style status classification for the request boundary
    ///
    /// Mirrors the status semantics of the external interface table:
    /// bad request (400), unauthorized (401), not found (404),
    /// conflict (409), internal (500). A material mismatch is a business
    /// rule rejection and classifies as a bad request.
    pub fn status_code(&self) -> u16 {
        match self {
            RewardsError::MissingField { .. }
            | RewardsError::MaterialMismatch { .. }
            | RewardsError::InvalidResourceKind { .. } => 400,
            RewardsError::InvalidCredentials => 401,
            RewardsError::BinNotFound { .. }
            | RewardsError::ProductNotFound { .. }
            | RewardsError::UserNotFound { .. } => 404,
            RewardsError::EmailTaken { .. } => 409,
            RewardsError::ArithmeticOverflow { .. } | RewardsError::Internal { .. } => 500,
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: &'static str) -> Self {
        RewardsError::MissingField { field }
    }

    /// Create a BinNotFound error
    pub fn bin_not_found(bin_id: &str) -> Self {
        RewardsError::BinNotFound {
            bin_id: bin_id.to_string(),
        }
    }

    /// Create a ProductNotFound error
    pub fn product_not_found(id: RecordId) -> Self {
        RewardsError::ProductNotFound { id }
    }

    /// Create a UserNotFound error
    pub fn user_not_found(id: RecordId) -> Self {
        RewardsError::UserNotFound { id }
    }

    /// Create a MaterialMismatch error
    pub fn material_mismatch(material: RecyclableType, accepted: Vec<RecyclableType>) -> Self {
        RewardsError::MaterialMismatch { material, accepted }
    }

    /// Create an EmailTaken error
    pub fn email_taken(email: &str) -> Self {
        RewardsError::EmailTaken {
            email: email.to_string(),
        }
    }

    /// Create an InvalidResourceKind error
    pub fn invalid_resource_kind(kind: &str) -> Self {
        RewardsError::InvalidResourceKind {
            kind: kind.to_string(),
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, user: RecordId) -> Self {
        RewardsError::ArithmeticOverflow {
            operation: operation.to_string(),
            user,
        }
    }

    /// Create an Internal error
    pub fn internal(message: &str) -> Self {
        RewardsError::Internal {
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use uuid::Uuid;

    fn fixed_id() -> RecordId {
        Uuid::from_u128(0xDEAD_BEEF)
    }

    #[rstest]
    #[case::missing_field(
        RewardsError::missing_field("binId"),
        "binId is required"
    )]
    #[case::bin_not_found(
        RewardsError::bin_not_found("BIN-XYZ-999"),
        "Invalid or inactive bin 'BIN-XYZ-999'"
    )]
    #[case::material_mismatch(
        RewardsError::material_mismatch(RecyclableType::Glass, vec![RecyclableType::Plastic, RecyclableType::Paper]),
        "This bin does not accept glass items"
    )]
    #[case::email_taken(
        RewardsError::email_taken("eco.user@example.com"),
        "User already exists"
    )]
    #[case::invalid_credentials(RewardsError::InvalidCredentials, "Invalid credentials")]
    #[case::invalid_resource_kind(
        RewardsError::invalid_resource_kind("warehouse"),
        "Invalid type 'warehouse'"
    )]
    fn test_error_display(#[case] error: RewardsError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case::missing_field(RewardsError::missing_field("userId"), 400)]
    #[case::mismatch(
        RewardsError::material_mismatch(RecyclableType::Glass, vec![RecyclableType::Plastic]),
        400
    )]
    #[case::invalid_kind(RewardsError::invalid_resource_kind("x"), 400)]
    #[case::unauthorized(RewardsError::InvalidCredentials, 401)]
    #[case::bin_not_found(RewardsError::bin_not_found("BIN-1"), 404)]
    #[case::product_not_found(RewardsError::product_not_found(fixed_id()), 404)]
    #[case::user_not_found(RewardsError::user_not_found(fixed_id()), 404)]
    #[case::conflict(RewardsError::email_taken("a@b.c"), 409)]
    #[case::overflow(RewardsError::arithmetic_overflow("credit", fixed_id()), 500)]
    #[case::internal(RewardsError::internal("boom"), 500)]
    fn test_status_classification(#[case] error: RewardsError, #[case] expected: u16) {
        assert_eq!(error.status_code(), expected);
    }

    #[test]
    fn test_material_mismatch_carries_accepted_set() {
        let error = RewardsError::material_mismatch(
            RecyclableType::Glass,
            vec![RecyclableType::Plastic, RecyclableType::Paper],
        );

        match error {
            RewardsError::MaterialMismatch { accepted, .. } => {
                assert_eq!(
                    accepted,
                    vec![RecyclableType::Plastic, RecyclableType::Paper]
                );
            }
            _ => panic!("Expected MaterialMismatch"),
        }
    }
}
