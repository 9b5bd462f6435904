use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::HashingError;

/// One-way secret hashing implementation.
///
/// Provides cryptographic hashing (internally uses Argon2id) for any secret
/// that must support equality checks without storing the plaintext: stored
/// passwords and one-time verification tokens alike.
pub struct SecretHasher;

impl SecretHasher {
    /// Create a new secret hasher instance.
    ///
    /// # Returns
    /// SecretHasher instance configured with secure defaults
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext secret securely.
    ///
    /// Uses Argon2id with random salt generation.
    ///
    /// # Arguments
    /// * `secret` - Plaintext secret to hash
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Hashing operation failed
    pub fn hash(&self, secret: &str) -> Result<String, HashingError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(secret.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| HashingError::HashingFailed(e.to_string()))
    }

    /// Verify a secret against a stored hash.
    ///
    /// # Arguments
    /// * `secret` - Plaintext secret to verify
    /// * `hash` - Stored hash in PHC string format
    ///
    /// # Returns
    /// True if the secret matches, false otherwise
    ///
    /// # Errors
    /// * `VerificationFailed` - Hash format is invalid or verification failed
    pub fn verify(&self, secret: &str, hash: &str) -> Result<bool, HashingError> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| HashingError::VerificationFailed(format!("Invalid hash: {}", e)))?;

        let argon2 = Argon2::default();

        Ok(argon2
            .verify_password(secret.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

impl Default for SecretHasher {
    fn default() -> Self {
        Self::new()
    }
}
