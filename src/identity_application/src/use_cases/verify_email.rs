use identity_core::{
    UseCaseError, UserRepository, UserRepositoryError, VerificationToken, VerificationTokenStore,
};

use crate::dto::UserDto;
use crate::use_case::UseCase;

/// Verify email use case - redeems a mailed verification token
pub struct VerifyEmailUseCase<T, R>
where
    T: VerificationTokenStore,
    R: UserRepository,
{
    token_store: T,
    user_repository: R,
}

impl<T, R> VerifyEmailUseCase<T, R>
where
    T: VerificationTokenStore,
    R: UserRepository,
{
    pub fn new(token_store: T, user_repository: R) -> Self {
        Self {
            token_store,
            user_repository,
        }
    }

    /// A token left behind here only re-verifies an already verified account.
    async fn spend(&self, token: &VerificationToken) {
        if let Err(e) = self.token_store.consume(token).await {
            tracing::warn!(error = %e, "Failed to remove redeemed verification token");
        }
    }
}

#[async_trait::async_trait]
impl<T, R> UseCase for VerifyEmailUseCase<T, R>
where
    T: VerificationTokenStore,
    R: UserRepository,
{
    /// The token exactly as it arrived in the link.
    type Request = String;
    type Response = UserDto;

    #[tracing::instrument(name = "VerifyEmailUseCase::execute", skip_all)]
    async fn execute(&self, raw_token: String) -> Result<UserDto, UseCaseError> {
        let token = VerificationToken::parse(&raw_token)
            .map_err(|_| UseCaseError::VerificationTokenInvalid)?;

        let user_id = self
            .token_store
            .peek(&token)
            .await
            .map_err(UseCaseError::unexpected)?
            .ok_or(UseCaseError::VerificationTokenInvalid)?;

        // The token is only spent once the account is verified, so a failed
        // update can be retried with the same link.
        let user = match self.user_repository.mark_verified(&user_id).await {
            Ok(user) => user,
            Err(UserRepositoryError::UserNotFound) => {
                self.spend(&token).await;
                return Err(UseCaseError::VerificationTokenInvalid);
            }
            Err(e) => return Err(UseCaseError::unexpected(e)),
        };

        self.spend(&token).await;

        tracing::info!(user_id = %user.id(), "Email address verified");

        Ok(UserDto::from(&user))
    }
}
