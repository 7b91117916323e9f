use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use identity_core::{ErrorKind, UseCaseError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum IdentityApiError {
    #[error(transparent)]
    UseCase(#[from] UseCaseError),

    #[error("No active session")]
    MissingSession,
}

impl IdentityApiError {
    fn kind(&self) -> ErrorKind {
        match self {
            IdentityApiError::UseCase(error) => error.kind(),
            IdentityApiError::MissingSession => ErrorKind::SessionNotFound,
        }
    }
}

pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::EmailInvalid
        | ErrorKind::PasswordInvalid
        | ErrorKind::UserInvalid
        | ErrorKind::VerificationTokenInvalid => StatusCode::BAD_REQUEST,

        ErrorKind::EmailAlreadyInUse => StatusCode::CONFLICT,

        ErrorKind::AuthenticationFailed
        | ErrorKind::AccountNotVerified
        | ErrorKind::SessionNotFound => StatusCode::UNAUTHORIZED,

        ErrorKind::UnexpectedError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for IdentityApiError {
    fn into_response(self) -> Response {
        let kind = self.kind();

        let message = match &self {
            IdentityApiError::UseCase(UseCaseError::UnexpectedError(detail)) => {
                tracing::error!(error = %detail, "Request failed unexpectedly");
                "An unexpected error occurred".to_string()
            }
            _ => self.to_string(),
        };

        let body = Json(ErrorResponse {
            kind: kind.as_str().to_string(),
            message,
        });

        (status_for(kind), body).into_response()
    }
}
