//! Password Hashing
//!
//! Argon2id hashing for stored credentials. Plaintext passwords never
//! reach a store; handlers hash before constructing the entity.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};

use crate::shared::error::{AdminError, Result};

/// Hash a plaintext password with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AdminError::internal(format!("password hashing failed: {e}")))?;
    Ok(hash.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::password_hash::PasswordHash;
    use argon2::PasswordVerifier;

    fn verifies(password: &str, stored: &str) -> bool {
        let parsed = PasswordHash::new(stored).unwrap();
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    #[test]
    fn hash_round_trips_through_verification() {
        let hash = hash_password("hunter2hunter2").unwrap();
        assert!(verifies("hunter2hunter2", &hash));
        assert!(!verifies("wrong-password", &hash));
    }

    #[test]
    fn hash_is_never_the_plaintext() {
        let hash = hash_password("correct horse battery").unwrap();
        assert_ne!(hash, "correct horse battery");
        assert!(hash.starts_with("$argon2"));
    }

    #[test]
    fn same_password_hashes_differently() {
        let a = hash_password("repeatable-input").unwrap();
        let b = hash_password("repeatable-input").unwrap();
        assert_ne!(a, b);
    }
}
