use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use identity_application::{SignUpRequestDto, SignUpUseCase, UseCase};
use identity_core::{EmailVerificationService, UserRepository};

use super::error::IdentityApiError;

#[tracing::instrument(name = "Signup", skip_all)]
pub async fn signup<R, V>(
    State((user_repository, verification_service)): State<(R, V)>,
    Json(request): Json<SignUpRequestDto>,
) -> Result<impl IntoResponse, IdentityApiError>
where
    R: UserRepository + Clone + 'static,
    V: EmailVerificationService + Clone + 'static,
{
    let use_case = SignUpUseCase::new(user_repository, verification_service);

    let response = use_case.execute(request).await?;

    Ok((StatusCode::CREATED, Json(response)))
}
