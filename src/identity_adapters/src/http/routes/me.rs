use axum::{Json, extract::State, response::IntoResponse};
use axum_extra::extract::CookieJar;
use identity_application::{CurrentUserUseCase, UseCase};
use identity_core::{SessionLayer, UserRepository};

use super::error::IdentityApiError;
use crate::http::SessionCookie;

#[tracing::instrument(name = "Current user", skip_all)]
pub async fn me<L, R>(
    State((session_layer, user_repository, session_cookie)): State<(L, R, SessionCookie)>,
    jar: CookieJar,
) -> Result<impl IntoResponse, IdentityApiError>
where
    L: SessionLayer + Clone + 'static,
    R: UserRepository + Clone + 'static,
{
    let session_id = session_cookie
        .session_id(&jar)
        .ok_or(IdentityApiError::MissingSession)?;

    let user = CurrentUserUseCase::new(session_layer, user_repository)
        .execute(session_id)
        .await?;

    Ok(Json(user))
}
