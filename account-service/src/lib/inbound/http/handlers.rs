use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::account::errors::AccountError;
use crate::verification::errors::VerificationError;

pub mod signin;
pub mod signup;
pub mod verify_email;

/// Outcome discriminator carried in every response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseStatus {
    Success,
    Pending,
    Failed,
}

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(
        status: StatusCode,
        outcome: ResponseStatus,
        message: impl Into<String>,
        data: Option<T>,
    ) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(outcome, message, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
    Forbidden(String),
    Gone(String),
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::InternalServerError(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::Gone(msg) => (StatusCode::GONE, msg),
        };

        (status, Json(ApiResponseBody::new_failure(message))).into_response()
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::InvalidAccountId(_)
            | AccountError::InvalidName(_)
            | AccountError::InvalidEmail(_)
            | AccountError::InvalidBirthDate(_)
            | AccountError::InvalidPassword(_)
            | AccountError::InvalidSigninInput(_) => ApiError::UnprocessableEntity(err.to_string()),
            AccountError::EmailAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            AccountError::NotFound(_) => ApiError::NotFound(err.to_string()),
            AccountError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            AccountError::NotVerified => ApiError::Forbidden(err.to_string()),
            AccountError::Verification(err) => ApiError::from(err),
            AccountError::Hashing(_)
            | AccountError::DatabaseError(_)
            | AccountError::Unknown(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<VerificationError> for ApiError {
    fn from(err: VerificationError) -> Self {
        match err {
            VerificationError::InvalidToken => ApiError::UnprocessableEntity(err.to_string()),
            VerificationError::RecordNotFound(_) => ApiError::NotFound(err.to_string()),
            VerificationError::Expired => ApiError::Gone(err.to_string()),
            VerificationError::Hashing(_)
            | VerificationError::Mail(_)
            | VerificationError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

/// Uniform `{status, message, data?}` envelope for every response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status: ResponseStatus,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(outcome: ResponseStatus, message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            status: outcome,
            message: message.into(),
            data,
        }
    }
}

impl ApiResponseBody<()> {
    pub fn new_failure(message: String) -> Self {
        Self {
            status: ResponseStatus::Failed,
            message,
            data: None,
        }
    }
}
