use identity_core::{AuthenticationStrategy, Credentials, SessionId, SessionLayer, UseCaseError};

use crate::dto::{LoginResponseDto, UserDto};
use crate::use_case::UseCase;

/// Successful login: the body for the client and the session the transport
/// layer has to hand out (as a cookie, never in the body).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub session_id: SessionId,
    pub response: LoginResponseDto,
}

/// Login use case - turns valid credentials for a verified account into a session
pub struct LoginUseCase<S, L>
where
    S: AuthenticationStrategy,
    L: SessionLayer,
{
    strategy: S,
    session_layer: L,
}

impl<S, L> LoginUseCase<S, L>
where
    S: AuthenticationStrategy,
    L: SessionLayer,
{
    pub fn new(strategy: S, session_layer: L) -> Self {
        Self {
            strategy,
            session_layer,
        }
    }
}

#[async_trait::async_trait]
impl<S, L> UseCase for LoginUseCase<S, L>
where
    S: AuthenticationStrategy,
    L: SessionLayer,
{
    type Request = Credentials;
    type Response = LoginOutcome;

    #[tracing::instrument(name = "LoginUseCase::execute", skip_all)]
    async fn execute(&self, credentials: Credentials) -> Result<LoginOutcome, UseCaseError> {
        let user = match self.strategy.authenticate(credentials).await {
            Ok(Some(user)) => user,
            Ok(None) => return Err(UseCaseError::AuthenticationFailed),
            Err(e) => {
                tracing::error!(error = %e, "Authentication strategy failed");
                return Err(UseCaseError::unexpected(e));
            }
        };

        // Only checked once the account is known to exist, so an unknown address
        // can never be told apart from a wrong password.
        if !user.is_verified() {
            return Err(UseCaseError::AccountNotVerified);
        }

        let session_id = self.session_layer.log_in(&user).await.map_err(|e| {
            tracing::error!(error = %e, user_id = %user.id(), "Failed to establish session");
            UseCaseError::unexpected(e)
        })?;

        tracing::info!(user_id = %user.id(), "User logged in");

        Ok(LoginOutcome {
            session_id,
            response: LoginResponseDto {
                user_dto: UserDto::from(&user),
            },
        })
    }
}
