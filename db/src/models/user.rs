use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};

use crate::error::DbError;

/// An admin credential record in the `users` collection.
///
/// Passwords are stored as argon2 PHC strings; verification never reveals
/// whether the username or the password was wrong.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub username: String,
    pub password_hash: String,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Builds a new user record, hashing the password with a fresh salt.
    pub fn new(username: impl Into<String>, password: &str) -> Result<Self, DbError> {
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| DbError::PasswordHash(e.to_string()))?
            .to_string();

        Ok(Self {
            id: None,
            username: username.into(),
            password_hash,
            created_at: Utc::now(),
        })
    }

    /// Constant-shape verification: parse failures and mismatches are the
    /// same `false`.
    pub fn verify_password(&self, candidate: &str) -> bool {
        match PasswordHash::new(&self.password_hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(candidate.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let user = User::new("admin", "correct horse").unwrap();
        assert!(user.verify_password("correct horse"));
        assert!(!user.verify_password("wrong horse"));
    }

    #[test]
    fn corrupt_hash_verifies_false() {
        let mut user = User::new("admin", "pw").unwrap();
        user.password_hash = "not-a-phc-string".into();
        assert!(!user.verify_password("pw"));
    }

    #[test]
    fn salts_are_unique_per_user() {
        let a = User::new("admin", "pw").unwrap();
        let b = User::new("admin", "pw").unwrap();
        assert_ne!(a.password_hash, b.password_hash);
    }
}
