use async_trait::async_trait;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::SigninCommand;
use crate::account::models::SignupCommand;
use crate::account::models::SignupStatus;

/// Port for account domain service operations.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new account with validated fields.
    ///
    /// # Arguments
    /// * `command` - Validated command containing name, email, password, and
    ///   date of birth
    ///
    /// # Returns
    /// `Pending` when a verification mail was dispatched, `Completed` in open
    /// mode
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Hashing` - Password hashing failed
    /// * `Verification` - Token issuance or mail dispatch failed (the account
    ///   row is not rolled back)
    /// * `DatabaseError` - Database operation failed
    async fn signup(&self, command: SignupCommand) -> Result<SignupStatus, AccountError>;

    /// Authenticate against a stored account.
    ///
    /// # Arguments
    /// * `command` - Trimmed, non-empty email and password
    ///
    /// # Returns
    /// The full stored account record
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or password mismatch
    /// * `NotVerified` - Account exists but its email is unverified
    ///   (verification-enforcing mode only)
    /// * `DatabaseError` - Database operation failed
    async fn signin(&self, command: SigninCommand) -> Result<Account, AccountError>;
}

/// Persistence operations for the account aggregate.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Persist a new account to storage.
    ///
    /// # Arguments
    /// * `account` - Account entity to create
    ///
    /// # Returns
    /// Created account entity
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn insert(&self, account: Account) -> Result<Account, AccountError>;

    /// Retrieve an account by email address.
    ///
    /// # Arguments
    /// * `email` - Email address string
    ///
    /// # Returns
    /// Optional account entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError>;

    /// Mark an account's email as verified.
    ///
    /// # Arguments
    /// * `id` - Account ID to update
    ///
    /// # Returns
    /// Unit on success
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `DatabaseError` - Database operation failed
    async fn set_verified(&self, id: &AccountId) -> Result<(), AccountError>;

    /// Remove an account from storage.
    ///
    /// # Arguments
    /// * `id` - Account ID to delete
    ///
    /// # Returns
    /// Unit on success
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &AccountId) -> Result<(), AccountError>;
}
