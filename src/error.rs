use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::{error, warn};

/// Tagged request error: every failure a handler can hit, carrying the
/// user-facing message and the HTTP status it maps to. Infra variants keep
/// the source error for logging only; it never reaches the response body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid inputs passed, please check your data.")]
    InvalidInput,
    #[error("User exists already, please login instead.")]
    DuplicateAccount,
    // One message for both "no such user" and "wrong password", so the
    // response does not reveal whether the account exists.
    #[error("Invalid credentials, could not log you in.")]
    InvalidCredentials,
    #[error("Could not reach the user store, please try again later.")]
    StoreUnavailable(#[source] sqlx::Error),
    #[error("Could not process credentials.")]
    CredentialOperationFailed(#[source] bcrypt::BcryptError),
    #[error("Could not save user, please try again later.")]
    PersistenceFailed(#[source] sqlx::Error),
    #[error("Could not create token, please try again later.")]
    TokenIssuanceFailed(#[source] jsonwebtoken::errors::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput | ApiError::DuplicateAccount => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::StoreUnavailable(_)
            | ApiError::CredentialOperationFailed(_)
            | ApiError::PersistenceFailed(_)
            | ApiError::TokenIssuanceFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let msg = self.to_string();
        if status.is_server_error() {
            error!(error = ?self, %status, "request failed");
        } else {
            warn!(%status, message = %msg, "request rejected");
        }
        (status, Json(serde_json::json!({ "message": msg }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_4xx() {
        assert_eq!(
            ApiError::InvalidInput.status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::DuplicateAccount.status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::InvalidCredentials.status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn infra_errors_map_to_500() {
        assert_eq!(
            ApiError::StoreUnavailable(sqlx::Error::PoolTimedOut).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::PersistenceFailed(sqlx::Error::PoolTimedOut).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        let bcrypt_err = bcrypt::verify("x", "not-a-valid-hash").unwrap_err();
        assert_eq!(
            ApiError::CredentialOperationFailed(bcrypt_err).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn credential_message_does_not_mention_lookup_or_password() {
        let msg = ApiError::InvalidCredentials.to_string();
        assert_eq!(msg, "Invalid credentials, could not log you in.");
        assert!(!msg.to_lowercase().contains("not found"));
        assert!(!msg.to_lowercase().contains("password"));
    }

    #[test]
    fn response_body_is_message_envelope() {
        let resp = ApiError::DuplicateAccount.into_response();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
