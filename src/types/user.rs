//! User account types
//!
//! A user owns a wallet whose balance is a cached aggregate of completed
//! reward transactions; the balance is only mutated by ledger credit
//! operations.

use crate::types::{Record, RecordId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

/// A registered account
///
/// `wallet_balance` must always equal the sum of the user's completed
/// reward transaction amounts when recomputed from the ledger; the engine
/// maintains it incrementally inside the settlement critical section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Store-assigned record identity
    pub id: RecordId,
    /// Unique across all users
    pub email: String,
    /// Salted credential hash; never exposed through profiles
    pub password_hash: String,
    pub name: String,
    pub phone: Option<String>,
    /// Cached aggregate of completed reward amounts, monotonic non-negative
    pub wallet_balance: Decimal,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Build an unsaved user with a zero wallet and the `user` role
    ///
    /// Identity and timestamps are placeholders until the store persists
    /// the record.
    pub fn new(email: String, password_hash: String, name: String, phone: Option<String>) -> Self {
        User {
            id: RecordId::nil(),
            email,
            password_hash,
            name,
            phone,
            wallet_balance: Decimal::ZERO,
            role: Role::User,
            created_at: DateTime::UNIX_EPOCH,
            updated_at: DateTime::UNIX_EPOCH,
        }
    }
}

impl Record for User {
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

/// Registration input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInput {
    pub email: String,
    /// Plaintext credential; hashed before the record is stored
    pub password: String,
    pub name: String,
    pub phone: Option<String>,
}

/// Public view of an account, safe to return to clients
///
/// Everything a user record carries except the credential hash.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserProfile {
    pub id: RecordId,
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub wallet_balance: Decimal,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        UserProfile {
            id: user.id,
            email: user.email,
            name: user.name,
            phone: user.phone,
            wallet_balance: user.wallet_balance,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User::new(
            "eco.user@example.com".to_string(),
            "salt$digest".to_string(),
            "Eco Warrior".to_string(),
            Some("+91 90000 00000".to_string()),
        )
    }

    #[test]
    fn test_new_user_has_zero_wallet_and_user_role() {
        let user = sample_user();

        assert_eq!(user.wallet_balance, Decimal::ZERO);
        assert_eq!(user.role, Role::User);
    }

    #[test]
    fn test_profile_drops_the_credential_hash() {
        let mut user = sample_user();
        user.wallet_balance = Decimal::new(35, 0);

        let profile = UserProfile::from(user.clone());

        assert_eq!(profile.email, user.email);
        assert_eq!(profile.name, user.name);
        assert_eq!(profile.wallet_balance, Decimal::new(35, 0));
        assert_eq!(profile.role, Role::User);
    }
}
