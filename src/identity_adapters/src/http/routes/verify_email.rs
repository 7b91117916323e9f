use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use identity_application::{UseCase, VerifyEmailUseCase};
use identity_core::{UserRepository, VerificationTokenStore};
use serde::Deserialize;

use super::error::IdentityApiError;

#[derive(Debug, Deserialize)]
pub struct VerifyEmailRequest {
    pub token: String,
}

async fn verify<T, R>(
    token_store: T,
    user_repository: R,
    token: String,
) -> Result<impl IntoResponse, IdentityApiError>
where
    T: VerificationTokenStore + Clone + 'static,
    R: UserRepository + Clone + 'static,
{
    let user = VerifyEmailUseCase::new(token_store, user_repository)
        .execute(token)
        .await?;

    Ok(Json(user))
}

#[tracing::instrument(name = "Verify email", skip_all)]
pub async fn verify_email<T, R>(
    State((token_store, user_repository)): State<(T, R)>,
    Json(request): Json<VerifyEmailRequest>,
) -> Result<impl IntoResponse, IdentityApiError>
where
    T: VerificationTokenStore + Clone + 'static,
    R: UserRepository + Clone + 'static,
{
    verify(token_store, user_repository, request.token).await
}

/// Target of the mailed link.
#[tracing::instrument(name = "Verify email link", skip_all)]
pub async fn verify_email_link<T, R>(
    State((token_store, user_repository)): State<(T, R)>,
    Query(request): Query<VerifyEmailRequest>,
) -> Result<impl IntoResponse, IdentityApiError>
where
    T: VerificationTokenStore + Clone + 'static,
    R: UserRepository + Clone + 'static,
{
    verify(token_store, user_repository, request.token).await
}
