use identity_core::{SessionId, SessionLayer, UseCaseError, UserRepository};

use crate::dto::UserDto;
use crate::use_case::UseCase;

/// Current user use case - re-hydrates the principal behind a session
pub struct CurrentUserUseCase<L, R>
where
    L: SessionLayer,
    R: UserRepository,
{
    session_layer: L,
    user_repository: R,
}

impl<L, R> CurrentUserUseCase<L, R>
where
    L: SessionLayer,
    R: UserRepository,
{
    pub fn new(session_layer: L, user_repository: R) -> Self {
        Self {
            session_layer,
            user_repository,
        }
    }
}

#[async_trait::async_trait]
impl<L, R> UseCase for CurrentUserUseCase<L, R>
where
    L: SessionLayer,
    R: UserRepository,
{
    type Request = SessionId;
    type Response = UserDto;

    #[tracing::instrument(name = "CurrentUserUseCase::execute", skip_all)]
    async fn execute(&self, session_id: SessionId) -> Result<UserDto, UseCaseError> {
        let user_id = self
            .session_layer
            .principal(&session_id)
            .await
            .map_err(UseCaseError::unexpected)?
            .ok_or(UseCaseError::SessionNotFound)?;

        let user = self
            .user_repository
            .find_by_id(&user_id)
            .await
            .map_err(UseCaseError::unexpected)?;

        match user {
            Some(user) => Ok(UserDto::from(&user)),
            None => {
                tracing::warn!(user_id = %user_id, "Session refers to a missing user");
                self.session_layer
                    .log_out(&session_id)
                    .await
                    .map_err(UseCaseError::unexpected)?;
                Err(UseCaseError::SessionNotFound)
            }
        }
    }
}
