use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use super::ResponseStatus;
use crate::account::errors::BirthDateError;
use crate::account::errors::EmailError;
use crate::account::errors::NameError;
use crate::account::errors::PasswordError;
use crate::account::models::BirthDate;
use crate::account::models::EmailAddress;
use crate::account::models::Password;
use crate::account::models::PersonName;
use crate::account::models::SignupCommand;
use crate::account::models::SignupStatus;
use crate::account::ports::AccountServicePort;
use crate::inbound::http::router::AppState;

pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequest>,
) -> Result<ApiSuccess<()>, ApiError> {
    let status = state
        .account_service
        .signup(body.try_into_command()?)
        .await
        .map_err(ApiError::from)?;

    Ok(match status {
        SignupStatus::Pending => ApiSuccess::new(
            StatusCode::ACCEPTED,
            ResponseStatus::Pending,
            "Verification email sent",
            None,
        ),
        SignupStatus::Completed => ApiSuccess::new(
            StatusCode::CREATED,
            ResponseStatus::Success,
            "Signup successful",
            None,
        ),
    })
}

/// HTTP request body for signup (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignupRequest {
    name: String,
    email: String,
    password: String,
    #[serde(rename = "dateOfBirth")]
    date_of_birth: String,
}

#[derive(Debug, Clone, Error)]
enum ParseSignupRequestError {
    #[error("Invalid name: {0}")]
    Name(#[from] NameError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid password: {0}")]
    Password(#[from] PasswordError),

    #[error("Invalid date of birth: {0}")]
    BirthDate(#[from] BirthDateError),
}

impl SignupRequest {
    fn try_into_command(self) -> Result<SignupCommand, ParseSignupRequestError> {
        let name = PersonName::new(self.name)?;
        let email = EmailAddress::new(self.email)?;
        let password = Password::new(self.password)?;
        let date_of_birth = BirthDate::new(&self.date_of_birth)?;
        Ok(SignupCommand::new(name, email, password, date_of_birth))
    }
}

impl From<ParseSignupRequestError> for ApiError {
    fn from(err: ParseSignupRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}
