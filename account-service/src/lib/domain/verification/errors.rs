use thiserror::Error;

/// Error for mail dispatch operations
#[derive(Debug, Clone, Error)]
pub enum MailError {
    #[error("Failed to send mail: {0}")]
    SendFailed(String),

    #[error("Mail API rejected the message with status {0}")]
    Rejected(u16),
}

/// Top-level error for the email-verification flow
#[derive(Debug, Clone, Error)]
pub enum VerificationError {
    // Resolution outcomes
    #[error("No verification record exists for account {0}; it may have been verified already. Please sign in or sign up")]
    RecordNotFound(String),

    #[error("Verification link has expired. Please sign up again")]
    Expired,

    #[error("Invalid verification details passed. Check your inbox")]
    InvalidToken,

    // Infrastructure errors, one per failing step
    #[error("Hashing error: {0}")]
    Hashing(String),

    #[error("Mail error: {0}")]
    Mail(#[from] MailError),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
