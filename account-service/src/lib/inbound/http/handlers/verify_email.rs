use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use super::ResponseStatus;
use crate::account::models::AccountId;
use crate::inbound::http::router::AppState;
use crate::verification::ports::VerificationServicePort;

pub async fn verify_email(
    State(state): State<AppState>,
    Path((account_id, token)): Path<(String, String)>,
) -> Result<ApiSuccess<()>, ApiError> {
    let account_id = AccountId::from_string(&account_id)
        .map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?;

    state
        .verification_service
        .resolve(&account_id, token.trim())
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ResponseStatus::Success,
        "Email verified successfully",
        None,
    ))
}
