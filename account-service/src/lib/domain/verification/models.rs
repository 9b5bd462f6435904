use std::fmt;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use uuid::Uuid;

use crate::account::models::AccountId;

/// Verification record unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VerificationId(pub Uuid);

impl VerificationId {
    /// Generate a new random verification ID.
    ///
    /// # Returns
    /// VerificationId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for VerificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Pending email-verification record.
///
/// Holds only the one-way hash of the mailed token, a back-reference to the
/// account it proves, and its validity window. Never updated in place:
/// resolution either deletes it (success, expiry) or leaves it untouched
/// (token mismatch, so the holder may retry).
#[derive(Debug, Clone)]
pub struct VerificationRecord {
    pub id: VerificationId,
    pub account_id: AccountId,
    pub token_hash: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl VerificationRecord {
    /// Build a fresh record for an account.
    ///
    /// # Arguments
    /// * `account_id` - Account the record proves control of
    /// * `token_hash` - One-way hash of the mailed token
    /// * `ttl` - Validity window added to the creation timestamp
    ///
    /// # Returns
    /// VerificationRecord expiring `ttl` from now
    pub fn issue(account_id: AccountId, token_hash: String, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            id: VerificationId::new(),
            account_id,
            token_hash,
            created_at: now,
            expires_at: now + ttl,
        }
    }

    /// Whether the record's validity window has passed.
    ///
    /// # Arguments
    /// * `now` - Instant to compare the expiry against
    ///
    /// # Returns
    /// True when the record expired before `now`
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}

/// A single templated message handed to the notification sender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

impl MailMessage {
    /// Build the verification email for an account.
    ///
    /// The link embeds the account id and the unhashed token; the hash never
    /// leaves the store.
    ///
    /// # Arguments
    /// * `to` - Recipient address
    /// * `base_url` - Public base URL of this service
    /// * `account_id` - Account the link verifies
    /// * `token` - Unhashed one-time token
    /// * `ttl` - Validity window, quoted in the message body
    ///
    /// # Returns
    /// MailMessage ready for dispatch
    pub fn verification(
        to: &str,
        base_url: &str,
        account_id: &AccountId,
        token: &str,
        ttl: Duration,
    ) -> Self {
        let link = format!(
            "{}/user/verify/{}/{}",
            base_url.trim_end_matches('/'),
            account_id,
            token
        );
        Self {
            to: to.to_string(),
            subject: "Verify Your Email".to_string(),
            html_body: format!(
                "<p>Verify your email address to complete the signup and sign in to your \
                 account.</p><p>This link <b>expires in {} hours</b>.</p>\
                 <p>Press <a href=\"{}\">here</a> to proceed.</p>",
                ttl.num_hours(),
                link
            ),
        }
    }
}
