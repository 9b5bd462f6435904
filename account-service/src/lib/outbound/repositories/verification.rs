use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::account::models::AccountId;
use crate::verification::errors::VerificationError;
use crate::verification::models::VerificationId;
use crate::verification::models::VerificationRecord;
use crate::verification::ports::VerificationRepository;

pub struct PostgresVerificationRepository {
    pool: PgPool,
}

impl PostgresVerificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn record_from_row(row: &PgRow) -> Result<VerificationRecord, VerificationError> {
        let id: Uuid = row
            .try_get("id")
            .map_err(|e| VerificationError::DatabaseError(e.to_string()))?;
        let account_id: Uuid = row
            .try_get("account_id")
            .map_err(|e| VerificationError::DatabaseError(e.to_string()))?;
        let token_hash: String = row
            .try_get("token_hash")
            .map_err(|e| VerificationError::DatabaseError(e.to_string()))?;
        let created_at: DateTime<Utc> = row
            .try_get("created_at")
            .map_err(|e| VerificationError::DatabaseError(e.to_string()))?;
        let expires_at: DateTime<Utc> = row
            .try_get("expires_at")
            .map_err(|e| VerificationError::DatabaseError(e.to_string()))?;

        Ok(VerificationRecord {
            id: VerificationId(id),
            account_id: AccountId(account_id),
            token_hash,
            created_at,
            expires_at,
        })
    }
}

#[async_trait]
impl VerificationRepository for PostgresVerificationRepository {
    async fn insert(
        &self,
        record: VerificationRecord,
    ) -> Result<VerificationRecord, VerificationError> {
        sqlx::query(
            r#"
            INSERT INTO account_verifications (id, account_id, token_hash, created_at, expires_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(record.id.0)
        .bind(record.account_id.0)
        .bind(&record.token_hash)
        .bind(record.created_at)
        .bind(record.expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| VerificationError::DatabaseError(e.to_string()))?;

        Ok(record)
    }

    async fn find_by_account_id(
        &self,
        account_id: &AccountId,
    ) -> Result<Option<VerificationRecord>, VerificationError> {
        // Several live records per account are possible; resolve against the
        // oldest, matching the first-record semantics of the lookup.
        let row = sqlx::query(
            r#"
            SELECT id, account_id, token_hash, created_at, expires_at
            FROM account_verifications
            WHERE account_id = $1
            ORDER BY created_at ASC
            LIMIT 1
            "#,
        )
        .bind(account_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| VerificationError::DatabaseError(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Self::record_from_row(&r)?)),
            None => Ok(None),
        }
    }

    async fn delete(&self, id: &VerificationId) -> Result<(), VerificationError> {
        sqlx::query(
            r#"
            DELETE FROM account_verifications
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| VerificationError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
