use uuid::Uuid;

/// One-time verification token.
///
/// A fresh random UUID concatenated with the owning account's id, so every
/// issued token is unique and bound to a single account. Only the one-way
/// hash of this value is persisted; the plaintext travels once, inside the
/// verification email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationToken(String);

impl VerificationToken {
    /// Generate a fresh token for an account.
    ///
    /// # Arguments
    /// * `account_id` - Id of the account the token is bound to
    ///
    /// # Returns
    /// VerificationToken with a random component followed by the account id
    pub fn generate(account_id: &str) -> Self {
        Self(format!("{}{}", Uuid::new_v4(), account_id))
    }

    /// Get the token as a string slice.
    ///
    /// # Returns
    /// Token string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VerificationToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
