use axum::{extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::CookieJar;
use identity_application::{LogoutUseCase, UseCase};
use identity_core::SessionLayer;

use super::error::IdentityApiError;
use crate::http::SessionCookie;

/// Always clears the cookie; logging out without a live session is not an error.
#[tracing::instrument(name = "Logout", skip_all)]
pub async fn logout<L>(
    State((session_layer, session_cookie)): State<(L, SessionCookie)>,
    jar: CookieJar,
) -> Result<impl IntoResponse, IdentityApiError>
where
    L: SessionLayer + Clone + 'static,
{
    if let Some(session_id) = session_cookie.session_id(&jar) {
        LogoutUseCase::new(session_layer)
            .execute(session_id)
            .await?;
    }

    Ok((jar.remove(session_cookie.removal()), StatusCode::OK))
}
