use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::error::AppError;

/// Hashes a password with argon2id and a fresh random salt.
pub fn hash(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Validation(format!("Password hashing failed: {e}")))
}

/// Checks a candidate password against a stored hash. Any parse or
/// verification failure counts as a mismatch.
pub fn verify(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Prefix sniff used by the admin bootstrap to spot a legacy plain-text
/// password that still needs hashing.
pub fn is_hashed(stored: &str) -> bool {
    stored.starts_with("$argon2")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hashed = hash("pw123").unwrap();
        assert!(is_hashed(&hashed));
        assert!(verify("pw123", &hashed));
        assert!(!verify("pw124", &hashed));
    }

    #[test]
    fn test_plain_text_is_not_hashed() {
        assert!(!is_hashed("renovate"));
        assert!(!verify("renovate", "renovate"));
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash("same").unwrap();
        let b = hash("same").unwrap();
        assert_ne!(a, b);
    }
}
