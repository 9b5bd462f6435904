use thiserror::Error;

/// Error for secret hashing operations
#[derive(Debug, Clone, Error)]
pub enum HashingError {
    #[error("Secret hashing failed: {0}")]
    HashingFailed(String),

    #[error("Secret verification failed: {0}")]
    VerificationFailed(String),
}
