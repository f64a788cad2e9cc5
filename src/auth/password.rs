/// Password Hashing and Verification
///
/// One-way bcrypt hashing; the salt is embedded in the output and the work
/// factor keeps a single hash in the tens of milliseconds. Strength rules
/// live in `crate::validation` so the service can report every violation.

use bcrypt::{hash, verify, DEFAULT_COST};

use crate::error::AppError;

/// Hash a plaintext password with bcrypt.
///
/// # Errors
/// Returns an error if bcrypt hashing fails.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
}

/// Verify a plaintext password against a stored bcrypt hash.
///
/// Comparison happens inside bcrypt itself; no timing information beyond
/// what the algorithm guarantees is exposed.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    verify(password, hash)
        .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password() {
        let password = "Valid1Pass!";
        let hash = hash_password(password).expect("Failed to hash password");

        assert_ne!(password, hash);
        // bcrypt identifier
        assert!(hash.starts_with("$2"));
    }

    #[test]
    fn test_verify_password() {
        let password = "Valid1Pass!";
        let hash = hash_password(password).expect("Failed to hash password");

        let is_valid = verify_password(password, &hash).expect("Failed to verify password");
        assert!(is_valid);
    }

    #[test]
    fn test_verify_wrong_password() {
        let hash = hash_password("Valid1Pass!").expect("Failed to hash password");

        let is_valid = verify_password("Wrong1Pass!", &hash).expect("Failed to verify password");
        assert!(!is_valid);
    }

    #[test]
    fn test_same_password_different_hashes() {
        // Salts are random, so two hashes of one password must differ.
        let h1 = hash_password("Valid1Pass!").expect("Failed to hash password");
        let h2 = hash_password("Valid1Pass!").expect("Failed to hash password");
        assert_ne!(h1, h2);
    }

    #[test]
    fn test_verify_against_garbage_hash_errors() {
        assert!(verify_password("Valid1Pass!", "not-a-bcrypt-hash").is_err());
    }
}
