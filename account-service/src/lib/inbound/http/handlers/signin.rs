use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::ResponseStatus;
use crate::account::models::Account;
use crate::account::models::SigninCommand;
use crate::account::ports::AccountServicePort;
use crate::inbound::http::router::AppState;

pub async fn signin(
    State(state): State<AppState>,
    Json(body): Json<SigninRequestBody>,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    let command = SigninCommand::new(body.email, body.password)
        .map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?;

    let account = state
        .account_service
        .signin(command)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ResponseStatus::Success,
        "Signin successful",
        Some((&account).into()),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SigninRequestBody {
    email: String,
    password: String,
}

/// The full stored account record, as signin has always returned it.
///
/// Includes the password hash; the upstream behavior is preserved rather
/// than silently fixed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountData {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub date_of_birth: String,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Account> for AccountData {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.to_string(),
            name: account.name.as_str().to_string(),
            email: account.email.as_str().to_string(),
            password_hash: account.password_hash.clone(),
            date_of_birth: account.date_of_birth.to_string(),
            verified: account.verified,
            created_at: account.created_at,
        }
    }
}
