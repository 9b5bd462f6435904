use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use credentials::SecretHasher;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::SigninCommand;
use crate::account::models::SignupCommand;
use crate::account::models::SignupStatus;
use crate::account::ports::AccountRepository;
use crate::account::ports::AccountServicePort;
use crate::verification::ports::VerificationServicePort;

/// Domain service for signup and signin.
///
/// Orchestrates the account store, the secret hasher, and the verification
/// service. `require_verification` selects between the two operating modes:
/// enforcing (signup issues a token, signin checks the verified flag) and
/// open (neither happens).
pub struct AccountService<AR, VS>
where
    AR: AccountRepository,
    VS: VerificationServicePort,
{
    repository: Arc<AR>,
    verification: Arc<VS>,
    password_hasher: SecretHasher,
    require_verification: bool,
}

impl<AR, VS> AccountService<AR, VS>
where
    AR: AccountRepository,
    VS: VerificationServicePort,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Account persistence implementation
    /// * `verification` - Email-verification flow implementation
    /// * `require_verification` - Whether signup issues tokens and signin
    ///   enforces the verified flag
    ///
    /// # Returns
    /// Configured account service instance
    pub fn new(repository: Arc<AR>, verification: Arc<VS>, require_verification: bool) -> Self {
        Self {
            repository,
            verification,
            password_hasher: SecretHasher::new(),
            require_verification,
        }
    }
}

#[async_trait]
impl<AR, VS> AccountServicePort for AccountService<AR, VS>
where
    AR: AccountRepository,
    VS: VerificationServicePort,
{
    async fn signup(&self, command: SignupCommand) -> Result<SignupStatus, AccountError> {
        // Existence check and insert are separate reads; a concurrent signup
        // with the same email can slip between them. The unique index on the
        // email column is the backstop.
        if self
            .repository
            .find_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            return Err(AccountError::EmailAlreadyExists(
                command.email.as_str().to_string(),
            ));
        }

        let password_hash = self
            .password_hasher
            .hash(command.password.as_str())
            .map_err(|e| AccountError::Hashing(e.to_string()))?;

        let account = Account {
            id: AccountId::new(),
            name: command.name,
            email: command.email,
            password_hash,
            date_of_birth: command.date_of_birth,
            verified: false,
            created_at: Utc::now(),
        };
        let account = self.repository.insert(account).await?;

        tracing::info!(account_id = %account.id, "Account created");

        if !self.require_verification {
            return Ok(SignupStatus::Completed);
        }

        // A failure past this point leaves the unverified account row in
        // place; there is no rollback or cleanup job.
        self.verification.issue(&account).await?;

        Ok(SignupStatus::Pending)
    }

    async fn signin(&self, command: SigninCommand) -> Result<Account, AccountError> {
        let account = self
            .repository
            .find_by_email(&command.email)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        // Verified check precedes any password comparison.
        if self.require_verification && !account.verified {
            return Err(AccountError::NotVerified);
        }

        let matches = self
            .password_hasher
            .verify(&command.password, &account.password_hash)
            .map_err(|e| AccountError::Hashing(e.to_string()))?;
        if !matches {
            return Err(AccountError::InvalidCredentials);
        }

        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::account::models::BirthDate;
    use crate::account::models::EmailAddress;
    use crate::account::models::Password;
    use crate::account::models::PersonName;
    use crate::verification::errors::MailError;
    use crate::verification::errors::VerificationError;

    mock! {
        pub TestAccountRepository {}

        #[async_trait]
        impl AccountRepository for TestAccountRepository {
            async fn insert(&self, account: Account) -> Result<Account, AccountError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError>;
            async fn set_verified(&self, id: &AccountId) -> Result<(), AccountError>;
            async fn delete(&self, id: &AccountId) -> Result<(), AccountError>;
        }
    }

    mock! {
        pub TestVerificationService {}

        #[async_trait]
        impl VerificationServicePort for TestVerificationService {
            async fn issue(&self, account: &Account) -> Result<(), VerificationError>;
            async fn resolve(&self, account_id: &AccountId, token: &str) -> Result<(), VerificationError>;
        }
    }

    fn signup_command() -> SignupCommand {
        SignupCommand::new(
            PersonName::new("Jane Doe".to_string()).unwrap(),
            EmailAddress::new("jane@x.com".to_string()).unwrap(),
            Password::new("longenough1".to_string()).unwrap(),
            BirthDate::new("1990-01-01").unwrap(),
        )
    }

    fn stored_account(password: &str, verified: bool) -> Account {
        Account {
            id: AccountId::new(),
            name: PersonName::new("Jane Doe".to_string()).unwrap(),
            email: EmailAddress::new("jane@x.com".to_string()).unwrap(),
            password_hash: SecretHasher::new().hash(password).unwrap(),
            date_of_birth: BirthDate::new("1990-01-01").unwrap(),
            verified,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_signup_creates_unverified_account_and_issues_token() {
        let mut repository = MockTestAccountRepository::new();
        repository
            .expect_find_by_email()
            .withf(|email| email == "jane@x.com")
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_insert()
            .withf(|account| {
                account.email.as_str() == "jane@x.com"
                    && !account.verified
                    && account.password_hash.starts_with("$argon2")
            })
            .times(1)
            .returning(|account| Ok(account));

        let mut verification = MockTestVerificationService::new();
        verification.expect_issue().times(1).returning(|_| Ok(()));

        let service = AccountService::new(Arc::new(repository), Arc::new(verification), true);

        let result = service.signup(signup_command()).await;
        assert_eq!(result.unwrap(), SignupStatus::Pending);
    }

    #[tokio::test]
    async fn test_signup_duplicate_email_writes_nothing() {
        let mut repository = MockTestAccountRepository::new();
        let existing = stored_account("longenough1", false);
        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        repository.expect_insert().times(0);

        let mut verification = MockTestVerificationService::new();
        verification.expect_issue().times(0);

        let service = AccountService::new(Arc::new(repository), Arc::new(verification), true);

        let result = service.signup(signup_command()).await;
        assert!(matches!(
            result.unwrap_err(),
            AccountError::EmailAlreadyExists(_)
        ));
    }

    #[tokio::test]
    async fn test_signup_open_mode_skips_verification() {
        let mut repository = MockTestAccountRepository::new();
        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_insert()
            .times(1)
            .returning(|account| Ok(account));

        let mut verification = MockTestVerificationService::new();
        verification.expect_issue().times(0);

        let service = AccountService::new(Arc::new(repository), Arc::new(verification), false);

        let result = service.signup(signup_command()).await;
        assert_eq!(result.unwrap(), SignupStatus::Completed);
    }

    #[tokio::test]
    async fn test_signup_surfaces_issue_failure_without_rollback() {
        let mut repository = MockTestAccountRepository::new();
        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_insert()
            .times(1)
            .returning(|account| Ok(account));
        // The inserted account row stays; no compensating delete.
        repository.expect_delete().times(0);

        let mut verification = MockTestVerificationService::new();
        verification.expect_issue().times(1).returning(|_| {
            Err(VerificationError::Mail(MailError::SendFailed(
                "connection refused".to_string(),
            )))
        });

        let service = AccountService::new(Arc::new(repository), Arc::new(verification), true);

        let result = service.signup(signup_command()).await;
        assert!(matches!(
            result.unwrap_err(),
            AccountError::Verification(VerificationError::Mail(_))
        ));
    }

    #[tokio::test]
    async fn test_signin_unknown_email_is_invalid_credentials() {
        let mut repository = MockTestAccountRepository::new();
        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let service = AccountService::new(
            Arc::new(repository),
            Arc::new(MockTestVerificationService::new()),
            true,
        );

        let command =
            SigninCommand::new("jane@x.com".to_string(), "longenough1".to_string()).unwrap();
        let result = service.signin(command).await;
        assert!(matches!(
            result.unwrap_err(),
            AccountError::InvalidCredentials
        ));
    }

    #[tokio::test]
    async fn test_signin_unverified_account_is_rejected_before_password_check() {
        let mut repository = MockTestAccountRepository::new();
        let account = stored_account("longenough1", false);
        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(account.clone())));

        let service = AccountService::new(
            Arc::new(repository),
            Arc::new(MockTestVerificationService::new()),
            true,
        );

        // Even the correct password does not get past the verified check.
        let command =
            SigninCommand::new("jane@x.com".to_string(), "longenough1".to_string()).unwrap();
        let result = service.signin(command).await;
        assert!(matches!(result.unwrap_err(), AccountError::NotVerified));
    }

    #[tokio::test]
    async fn test_signin_open_mode_ignores_verified_flag() {
        let mut repository = MockTestAccountRepository::new();
        let account = stored_account("longenough1", false);
        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(account.clone())));

        let service = AccountService::new(
            Arc::new(repository),
            Arc::new(MockTestVerificationService::new()),
            false,
        );

        let command =
            SigninCommand::new("jane@x.com".to_string(), "longenough1".to_string()).unwrap();
        let result = service.signin(command).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_signin_wrong_password_is_invalid_credentials() {
        let mut repository = MockTestAccountRepository::new();
        let account = stored_account("longenough1", true);
        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(account.clone())));

        let service = AccountService::new(
            Arc::new(repository),
            Arc::new(MockTestVerificationService::new()),
            true,
        );

        let command =
            SigninCommand::new("jane@x.com".to_string(), "wrong_password".to_string()).unwrap();
        let result = service.signin(command).await;
        assert!(matches!(
            result.unwrap_err(),
            AccountError::InvalidCredentials
        ));
    }

    #[tokio::test]
    async fn test_signin_verified_account_returns_stored_record() {
        let mut repository = MockTestAccountRepository::new();
        let account = stored_account("longenough1", true);
        let expected_hash = account.password_hash.clone();
        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(account.clone())));

        let service = AccountService::new(
            Arc::new(repository),
            Arc::new(MockTestVerificationService::new()),
            true,
        );

        let command =
            SigninCommand::new("jane@x.com".to_string(), "longenough1".to_string()).unwrap();
        let result = service.signin(command).await.unwrap();
        assert_eq!(result.email.as_str(), "jane@x.com");
        // The stored record comes back as-is, password hash included.
        assert_eq!(result.password_hash, expected_hash);
    }
}
