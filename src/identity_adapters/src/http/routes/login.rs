use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::CookieJar;
use identity_application::{LoginUseCase, LogoutUseCase, UseCase};
use identity_core::{AuthenticationStrategy, Credentials, SessionLayer};

use super::error::IdentityApiError;
use crate::http::SessionCookie;

/// A session already held in the jar is ended once the new one is issued.
#[tracing::instrument(name = "Login", skip_all)]
pub async fn login<S, L>(
    State((strategy, session_layer, session_cookie)): State<(S, L, SessionCookie)>,
    jar: CookieJar,
    Json(credentials): Json<Credentials>,
) -> Result<impl IntoResponse, IdentityApiError>
where
    S: AuthenticationStrategy + Clone + 'static,
    L: SessionLayer + Clone + 'static,
{
    let use_case = LoginUseCase::new(strategy, session_layer.clone());

    let outcome = use_case.execute(credentials).await?;

    if let Some(previous) = session_cookie.session_id(&jar) {
        if let Err(e) = LogoutUseCase::new(session_layer).execute(previous).await {
            tracing::warn!(error = %e, "Failed to end the previous session");
        }
    }

    let jar = jar.add(session_cookie.issue(&outcome.session_id));

    Ok((jar, (StatusCode::OK, Json(outcome.response))))
}
