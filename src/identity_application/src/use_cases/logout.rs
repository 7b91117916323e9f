use identity_core::{SessionId, SessionLayer, UseCaseError};

use crate::use_case::UseCase;

/// Logout use case - ends a server-side session
pub struct LogoutUseCase<L>
where
    L: SessionLayer,
{
    session_layer: L,
}

impl<L> LogoutUseCase<L>
where
    L: SessionLayer,
{
    pub fn new(session_layer: L) -> Self {
        Self { session_layer }
    }
}

#[async_trait::async_trait]
impl<L> UseCase for LogoutUseCase<L>
where
    L: SessionLayer,
{
    type Request = SessionId;
    type Response = ();

    /// Ending a session that does not exist is a no-op.
    #[tracing::instrument(name = "LogoutUseCase::execute", skip_all)]
    async fn execute(&self, session_id: SessionId) -> Result<(), UseCaseError> {
        self.session_layer
            .log_out(&session_id)
            .await
            .map_err(UseCaseError::unexpected)
    }
}
