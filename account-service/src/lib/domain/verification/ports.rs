use async_trait::async_trait;

use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::verification::errors::MailError;
use crate::verification::errors::VerificationError;
use crate::verification::models::MailMessage;
use crate::verification::models::VerificationId;
use crate::verification::models::VerificationRecord;

/// Port for the email-verification domain service.
#[async_trait]
pub trait VerificationServicePort: Send + Sync + 'static {
    /// Issue a one-time token for a freshly created account.
    ///
    /// Generates and hashes a token, persists the record, and mails the
    /// unhashed token to the account's address. Steps are sequential; a
    /// later failure does not revert earlier writes.
    ///
    /// # Arguments
    /// * `account` - Account awaiting verification
    ///
    /// # Returns
    /// Unit once the record is stored and the mail dispatched
    ///
    /// # Errors
    /// * `Hashing` - Token hashing failed
    /// * `DatabaseError` - Record could not be stored
    /// * `Mail` - Mail dispatch failed (the record persists)
    async fn issue(&self, account: &Account) -> Result<(), VerificationError>;

    /// Resolve a verification-link visit.
    ///
    /// # Arguments
    /// * `account_id` - Account the link claims to verify
    /// * `token` - Unhashed token from the link
    ///
    /// # Returns
    /// Unit when the account was marked verified
    ///
    /// # Errors
    /// * `RecordNotFound` - No pending record for the account (never issued
    ///   or already verified)
    /// * `Expired` - Window passed; the record and the account are deleted
    /// * `InvalidToken` - Token mismatch; nothing is deleted, retry allowed
    /// * `Hashing` - Token comparison failed
    /// * `DatabaseError` - Database operation failed
    async fn resolve(&self, account_id: &AccountId, token: &str) -> Result<(), VerificationError>;
}

/// Persistence operations for verification records.
#[async_trait]
pub trait VerificationRepository: Send + Sync + 'static {
    /// Persist a new verification record.
    ///
    /// # Arguments
    /// * `record` - Record to create
    ///
    /// # Returns
    /// Created record
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn insert(&self, record: VerificationRecord)
        -> Result<VerificationRecord, VerificationError>;

    /// Retrieve the oldest pending record for an account.
    ///
    /// Nothing prevents several live records per account (repeated signups
    /// before verification); lookups resolve against the oldest.
    ///
    /// # Arguments
    /// * `account_id` - Account back-reference to search for
    ///
    /// # Returns
    /// Optional record (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_account_id(
        &self,
        account_id: &AccountId,
    ) -> Result<Option<VerificationRecord>, VerificationError>;

    /// Remove a verification record by its own id.
    ///
    /// # Arguments
    /// * `id` - Record ID to delete
    ///
    /// # Returns
    /// Unit on success
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &VerificationId) -> Result<(), VerificationError>;
}

/// Dispatch of a single templated email to one address.
#[async_trait]
pub trait MailSender: Send + Sync + 'static {
    /// Send one message, reporting success or failure.
    ///
    /// # Arguments
    /// * `message` - Recipient, subject, and HTML body
    ///
    /// # Returns
    /// Unit on success
    ///
    /// # Errors
    /// * `SendFailed` - Transport-level failure
    /// * `Rejected` - The mail API refused the message
    async fn send(&self, message: &MailMessage) -> Result<(), MailError>;
}
