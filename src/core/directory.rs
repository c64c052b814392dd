//! User directory
//!
//! Registration and credential checks over the shared user collection.
//! Credentials are stored as a salted SHA-256 hash; profiles returned to
//! clients never carry the hash.

use crate::store::{EntityStore, MemoryStore};
use crate::types::{RecordId, RewardsError, User, UserInput, UserProfile};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use rand::Rng;
use sha2::{Digest, Sha256};
use std::sync::{Arc, Mutex};

/// Directory of registered accounts
///
/// Cloneable view over the shared user collection.
#[derive(Debug, Clone)]
pub struct UserDirectory {
    users: Arc<MemoryStore<User>>,
    /// Serializes the email-uniqueness check against the insert so two
    /// concurrent registrations cannot both claim the same address.
    registration: Arc<Mutex<()>>,
}

impl UserDirectory {
    /// Create a directory over the shared user collection
    pub fn new(users: Arc<MemoryStore<User>>) -> Self {
        UserDirectory {
            users,
            registration: Arc::new(Mutex::new(())),
        }
    }

    /// Register a new account
    ///
    /// Email, password, and name are required; the email must not already
    /// be registered. The credential is hashed before the record is
    /// stored and the wallet starts at zero.
    pub fn register(&self, input: UserInput) -> Result<User, RewardsError> {
        if input.email.is_empty() {
            return Err(RewardsError::missing_field("email"));
        }
        if input.password.is_empty() {
            return Err(RewardsError::missing_field("password"));
        }
        if input.name.is_empty() {
            return Err(RewardsError::missing_field("name"));
        }

        let _guard = self
            .registration
            .lock()
            .map_err(|_| RewardsError::internal("registration lock poisoned"))?;

        if self.find_by_email(&input.email).is_some() {
            return Err(RewardsError::email_taken(&input.email));
        }

        let password_hash = hash_password(&input.password);
        Ok(self
            .users
            .insert(User::new(input.email, password_hash, input.name, input.phone)))
    }

    /// Check credentials and return the account's public profile
    ///
    /// An unknown email and a wrong password are indistinguishable to the
    /// caller.
    pub fn login(&self, email: &str, password: &str) -> Result<UserProfile, RewardsError> {
        if email.is_empty() {
            return Err(RewardsError::missing_field("email"));
        }
        if password.is_empty() {
            return Err(RewardsError::missing_field("password"));
        }

        let user = self
            .find_by_email(email)
            .ok_or(RewardsError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash) {
            return Err(RewardsError::InvalidCredentials);
        }

        Ok(UserProfile::from(user))
    }

    /// Fetch an account by record identity
    pub fn get(&self, id: &RecordId) -> Option<User> {
        self.users.get(id)
    }

    /// Fetch an account by email
    pub fn find_by_email(&self, email: &str) -> Option<User> {
        self.users.find(|user| user.email == email)
    }
}

/// Hash a credential with a fresh random salt
///
/// Format: `<base64 salt>$<base64 sha256(salt || password)>`.
pub(crate) fn hash_password(password: &str) -> String {
    let salt: [u8; 16] = rand::thread_rng().gen();
    let digest = Sha256::new()
        .chain_update(salt)
        .chain_update(password.as_bytes())
        .finalize();
    format!("{}${}", STANDARD.encode(salt), STANDARD.encode(digest))
}

/// Check a credential against a stored salted hash
///
/// Malformed stored values never verify.
fn verify_password(password: &str, stored: &str) -> bool {
    let Some((salt_b64, digest_b64)) = stored.split_once('$') else {
        return false;
    };
    let Ok(salt) = STANDARD.decode(salt_b64) else {
        return false;
    };
    let digest = Sha256::new()
        .chain_update(&salt)
        .chain_update(password.as_bytes())
        .finalize();
    STANDARD.encode(digest) == digest_b64
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal::Decimal;

    fn directory() -> UserDirectory {
        UserDirectory::new(Arc::new(MemoryStore::new()))
    }

    fn sample_input() -> UserInput {
        UserInput {
            email: "eco.user@example.com".to_string(),
            password: "password123".to_string(),
            name: "Eco Warrior".to_string(),
            phone: Some("+91 90000 00000".to_string()),
        }
    }

    #[test]
    fn test_register_creates_account_with_zero_wallet() {
        let directory = directory();

        let user = directory.register(sample_input()).unwrap();

        assert_eq!(user.email, "eco.user@example.com");
        assert_eq!(user.wallet_balance, Decimal::ZERO);
        // Stored hash is salted, never the plaintext
        assert_ne!(user.password_hash, "password123");
        assert!(user.password_hash.contains('$'));
    }

    #[test]
    fn test_duplicate_email_conflicts_and_first_record_survives() {
        let directory = directory();
        let first = directory.register(sample_input()).unwrap();

        let mut second = sample_input();
        second.name = "Impostor".to_string();
        let result = directory.register(second);

        assert!(matches!(result, Err(RewardsError::EmailTaken { .. })));
        let stored = directory.get(&first.id).unwrap();
        assert_eq!(stored.name, "Eco Warrior");
    }

    #[rstest]
    #[case::email("", "password123", "Eco Warrior", "email")]
    #[case::password("eco.user@example.com", "", "Eco Warrior", "password")]
    #[case::name("eco.user@example.com", "password123", "", "name")]
    fn test_register_requires_fields(
        #[case] email: &str,
        #[case] password: &str,
        #[case] name: &str,
        #[case] field: &str,
    ) {
        let result = directory().register(UserInput {
            email: email.to_string(),
            password: password.to_string(),
            name: name.to_string(),
            phone: None,
        });

        match result {
            Err(RewardsError::MissingField { field: missing }) => assert_eq!(missing, field),
            other => panic!("Expected MissingField, got {:?}", other),
        }
    }

    #[test]
    fn test_login_returns_profile_without_hash() {
        let directory = directory();
        let user = directory.register(sample_input()).unwrap();

        let profile = directory
            .login("eco.user@example.com", "password123")
            .unwrap();

        assert_eq!(profile.id, user.id);
        assert_eq!(profile.name, "Eco Warrior");
    }

    #[test]
    fn test_login_rejects_wrong_password() {
        let directory = directory();
        directory.register(sample_input()).unwrap();

        let result = directory.login("eco.user@example.com", "letmein");
        assert_eq!(result, Err(RewardsError::InvalidCredentials));
    }

    #[test]
    fn test_login_rejects_unknown_email() {
        let result = directory().login("nobody@example.com", "password123");
        assert_eq!(result, Err(RewardsError::InvalidCredentials));
    }

    #[test]
    fn test_hash_verify_round_trip() {
        let stored = hash_password("password123");

        assert!(verify_password("password123", &stored));
        assert!(!verify_password("password124", &stored));
    }

    #[test]
    fn test_hashes_are_salted() {
        // Same password, different salts, different hashes
        assert_ne!(hash_password("password123"), hash_password("password123"));
    }

    #[test]
    fn test_malformed_stored_hash_never_verifies() {
        assert!(!verify_password("password123", "no-separator"));
        assert!(!verify_password("password123", "!!!$???"));
    }
}
