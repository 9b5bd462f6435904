use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use chrono::Utc;
use credentials::SecretHasher;
use credentials::VerificationToken;

use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::ports::AccountRepository;
use crate::verification::errors::VerificationError;
use crate::verification::models::MailMessage;
use crate::verification::models::VerificationRecord;
use crate::verification::ports::MailSender;
use crate::verification::ports::VerificationRepository;
use crate::verification::ports::VerificationServicePort;

/// Domain service for the email-verification flow.
///
/// Issues one-time tokens at signup and resolves verification-link visits.
/// Resolution steps (compare, mark verified, delete record) run sequentially
/// with no transaction spanning them.
pub struct VerificationService<VR, AR>
where
    VR: VerificationRepository,
    AR: AccountRepository,
{
    repository: Arc<VR>,
    accounts: Arc<AR>,
    mail_sender: Arc<dyn MailSender>,
    token_hasher: SecretHasher,
    token_ttl: Duration,
    base_url: String,
}

impl<VR, AR> VerificationService<VR, AR>
where
    VR: VerificationRepository,
    AR: AccountRepository,
{
    /// Create a new verification service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Verification record persistence implementation
    /// * `accounts` - Account persistence implementation
    /// * `mail_sender` - Notification dispatch implementation
    /// * `token_ttl_hours` - Validity window for issued tokens
    /// * `base_url` - Public base URL embedded in verification links
    ///
    /// # Returns
    /// Configured verification service instance
    pub fn new(
        repository: Arc<VR>,
        accounts: Arc<AR>,
        mail_sender: Arc<dyn MailSender>,
        token_ttl_hours: i64,
        base_url: String,
    ) -> Self {
        Self {
            repository,
            accounts,
            mail_sender,
            token_hasher: SecretHasher::new(),
            token_ttl: Duration::hours(token_ttl_hours),
            base_url,
        }
    }
}

#[async_trait]
impl<VR, AR> VerificationServicePort for VerificationService<VR, AR>
where
    VR: VerificationRepository,
    AR: AccountRepository,
{
    async fn issue(&self, account: &Account) -> Result<(), VerificationError> {
        let token = VerificationToken::generate(&account.id.to_string());

        // Only the hash is stored; the plaintext travels once, in the mail.
        let token_hash = self
            .token_hasher
            .hash(token.as_str())
            .map_err(|e| VerificationError::Hashing(e.to_string()))?;

        let record = VerificationRecord::issue(account.id, token_hash, self.token_ttl);
        self.repository.insert(record).await?;

        let message = MailMessage::verification(
            account.email.as_str(),
            &self.base_url,
            &account.id,
            token.as_str(),
            self.token_ttl,
        );
        self.mail_sender.send(&message).await?;

        tracing::info!(account_id = %account.id, "Verification mail dispatched");

        Ok(())
    }

    async fn resolve(&self, account_id: &AccountId, token: &str) -> Result<(), VerificationError> {
        let record = self
            .repository
            .find_by_account_id(account_id)
            .await?
            .ok_or_else(|| VerificationError::RecordNotFound(account_id.to_string()))?;

        if record.is_expired(Utc::now()) {
            // Expiry trumps token correctness. The record is deleted by its
            // own id and the account by the account id; the two deletes are
            // independent and neither reverts the other on failure.
            self.repository.delete(&record.id).await?;
            self.accounts
                .delete(account_id)
                .await
                .map_err(|e| VerificationError::DatabaseError(e.to_string()))?;
            tracing::info!(account_id = %account_id, "Expired verification cascaded to account deletion");
            return Err(VerificationError::Expired);
        }

        let matches = self
            .token_hasher
            .verify(token, &record.token_hash)
            .map_err(|e| VerificationError::Hashing(e.to_string()))?;
        if !matches {
            // Record stays in place so the holder of the real link may retry.
            return Err(VerificationError::InvalidToken);
        }

        self.accounts
            .set_verified(account_id)
            .await
            .map_err(|e| VerificationError::DatabaseError(e.to_string()))?;
        self.repository.delete(&record.id).await?;

        tracing::info!(account_id = %account_id, "Account verified");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::account::errors::AccountError;
    use crate::account::models::BirthDate;
    use crate::account::models::EmailAddress;
    use crate::account::models::PersonName;
    use crate::verification::errors::MailError;
    use crate::verification::models::VerificationId;

    mock! {
        pub TestVerificationRepository {}

        #[async_trait]
        impl VerificationRepository for TestVerificationRepository {
            async fn insert(&self, record: VerificationRecord) -> Result<VerificationRecord, VerificationError>;
            async fn find_by_account_id(&self, account_id: &AccountId) -> Result<Option<VerificationRecord>, VerificationError>;
            async fn delete(&self, id: &VerificationId) -> Result<(), VerificationError>;
        }
    }

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
        pub TestMailSender {}

        #[async_trait]
        impl MailSender for TestMailSender {
            async fn send(&self, message: &MailMessage) -> Result<(), MailError>;
        }
    }

    fn pending_account() -> Account {
        Account {
            id: AccountId::new(),
            name: PersonName::new("Jane Doe".to_string()).unwrap(),
            email: EmailAddress::new("jane@x.com".to_string()).unwrap(),
            password_hash: "$argon2id$test_hash".to_string(),
            date_of_birth: BirthDate::new("1990-01-01").unwrap(),
            verified: false,
            created_at: Utc::now(),
        }
    }

    fn service(
        repository: MockTestVerificationRepository,
        accounts: MockTestAccountRepository,
        mail_sender: MockTestMailSender,
    ) -> VerificationService<MockTestVerificationRepository, MockTestAccountRepository> {
        VerificationService::new(
            Arc::new(repository),
            Arc::new(accounts),
            Arc::new(mail_sender),
            6,
            "http://localhost:5000".to_string(),
        )
    }

    #[tokio::test]
    async fn test_issue_stores_record_and_sends_mail() {
        let account = pending_account();
        let account_id = account.id;

        let mut repository = MockTestVerificationRepository::new();
        repository
            .expect_insert()
            .withf(move |record| {
                record.account_id == account_id
                    && record.token_hash.starts_with("$argon2")
                    && record.expires_at > record.created_at
            })
            .times(1)
            .returning(|record| Ok(record));

        let mut mail_sender = MockTestMailSender::new();
        mail_sender
            .expect_send()
            .withf(move |message| {
                message.to == "jane@x.com"
                    && message.subject == "Verify Your Email"
                    && message
                        .html_body
                        .contains(&format!("/user/verify/{}/", account_id))
            })
            .times(1)
            .returning(|_| Ok(()));

        let service = service(repository, MockTestAccountRepository::new(), mail_sender);

        assert!(service.issue(&account).await.is_ok());
    }

    #[tokio::test]
    async fn test_issue_surfaces_mail_failure_without_reverting_record() {
        let account = pending_account();

        let mut repository = MockTestVerificationRepository::new();
        repository
            .expect_insert()
            .times(1)
            .returning(|record| Ok(record));
        // No delete expectation: the stored record is not rolled back.
        repository.expect_delete().times(0);

        let mut mail_sender = MockTestMailSender::new();
        mail_sender
            .expect_send()
            .times(1)
            .returning(|_| Err(MailError::SendFailed("connection refused".to_string())));

        let service = service(repository, MockTestAccountRepository::new(), mail_sender);

        let result = service.issue(&account).await;
        assert!(matches!(result, Err(VerificationError::Mail(_))));
    }

    #[tokio::test]
    async fn test_resolve_unknown_account_reports_record_not_found() {
        let mut repository = MockTestVerificationRepository::new();
        repository
            .expect_find_by_account_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = service(
            repository,
            MockTestAccountRepository::new(),
            MockTestMailSender::new(),
        );

        let result = service.resolve(&AccountId::new(), "whatever").await;
        assert!(matches!(result, Err(VerificationError::RecordNotFound(_))));
    }

    #[tokio::test]
    async fn test_resolve_expired_deletes_record_and_account() {
        let account_id = AccountId::new();
        let record_id = VerificationId::new();
        let record = VerificationRecord {
            id: record_id,
            account_id,
            token_hash: "$argon2id$test_hash".to_string(),
            created_at: Utc::now() - Duration::hours(8),
            expires_at: Utc::now() - Duration::hours(2),
        };

        let mut repository = MockTestVerificationRepository::new();
        let returned = record.clone();
        repository
            .expect_find_by_account_id()
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));
        repository
            .expect_delete()
            .withf(move |id| *id == record_id)
            .times(1)
            .returning(|_| Ok(()));

        let mut accounts = MockTestAccountRepository::new();
        accounts
            .expect_delete()
            .withf(move |id| *id == account_id)
            .times(1)
            .returning(|_| Ok(()));

        let service = service(repository, accounts, MockTestMailSender::new());

        // Token correctness is irrelevant once the window has passed.
        let result = service.resolve(&account_id, "even-the-right-token").await;
        assert!(matches!(result, Err(VerificationError::Expired)));
    }

    #[tokio::test]
    async fn test_resolve_wrong_token_leaves_everything_in_place() {
        let account_id = AccountId::new();
        let token_hash = SecretHasher::new().hash("the-real-token").unwrap();
        let record = VerificationRecord {
            id: VerificationId::new(),
            account_id,
            token_hash,
            created_at: Utc::now(),
            expires_at: Utc::now() + Duration::hours(6),
        };

        let mut repository = MockTestVerificationRepository::new();
        let returned = record.clone();
        repository
            .expect_find_by_account_id()
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));
        repository.expect_delete().times(0);

        let mut accounts = MockTestAccountRepository::new();
        accounts.expect_set_verified().times(0);
        accounts.expect_delete().times(0);

        let service = service(repository, accounts, MockTestMailSender::new());

        let result = service.resolve(&account_id, "a-guessed-token").await;
        assert!(matches!(result, Err(VerificationError::InvalidToken)));
    }

    #[tokio::test]
    async fn test_resolve_correct_token_verifies_and_deletes_record() {
        let account_id = AccountId::new();
        let record_id = VerificationId::new();
        let token_hash = SecretHasher::new().hash("the-real-token").unwrap();
        let record = VerificationRecord {
            id: record_id,
            account_id,
            token_hash,
            created_at: Utc::now(),
            expires_at: Utc::now() + Duration::hours(6),
        };

        let mut repository = MockTestVerificationRepository::new();
        let returned = record.clone();
        repository
            .expect_find_by_account_id()
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));
        repository
            .expect_delete()
            .withf(move |id| *id == record_id)
            .times(1)
            .returning(|_| Ok(()));

        let mut accounts = MockTestAccountRepository::new();
        accounts
            .expect_set_verified()
            .withf(move |id| *id == account_id)
            .times(1)
            .returning(|_| Ok(()));

        let service = service(repository, accounts, MockTestMailSender::new());

        assert!(service.resolve(&account_id, "the-real-token").await.is_ok());
    }

    #[tokio::test]
    async fn test_resolve_after_deletion_reports_record_not_found() {
        // Once the record is gone a second visit must not report success.
        let mut repository = MockTestVerificationRepository::new();
        repository
            .expect_find_by_account_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = service(
            repository,
            MockTestAccountRepository::new(),
            MockTestMailSender::new(),
        );

        let result = service.resolve(&AccountId::new(), "the-real-token").await;
        assert!(matches!(result, Err(VerificationError::RecordNotFound(_))));
    }
}
