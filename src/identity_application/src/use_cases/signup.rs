use identity_core::{
    EmailVerificationService, Outcome, Password, UseCaseError, User, UserEmail, UserProps,
    UserRepository, UserRepositoryError, combine,
};
use secrecy::Secret;
use serde::Deserialize;

use crate::dto::SignUpResponseDto;
use crate::use_case::UseCase;

/// Signup request as received from the client.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequestDto {
    pub email: String,
    pub password: Secret<String>,
    pub first_name: String,
    pub last_name: String,
}

/// Signup use case - validates, persists and announces a new account
pub struct SignUpUseCase<R, V>
where
    R: UserRepository,
    V: EmailVerificationService,
{
    user_repository: R,
    verification_service: V,
}

impl<R, V> SignUpUseCase<R, V>
where
    R: UserRepository,
    V: EmailVerificationService,
{
    pub fn new(user_repository: R, verification_service: V) -> Self {
        Self {
            user_repository,
            verification_service,
        }
    }

    async fn email_in_use(&self, email: &UserEmail) -> Result<bool, UseCaseError> {
        self.user_repository
            .exists(email)
            .await
            .map_err(UseCaseError::unexpected)
    }
}

#[async_trait::async_trait]
impl<R, V> UseCase for SignUpUseCase<R, V>
where
    R: UserRepository,
    V: EmailVerificationService,
{
    type Request = SignUpRequestDto;
    type Response = SignUpResponseDto;

    #[tracing::instrument(name = "SignUpUseCase::execute", skip_all)]
    async fn execute(&self, request: SignUpRequestDto) -> Result<SignUpResponseDto, UseCaseError> {
        let email_or_error = UserEmail::create(&request.email);
        if email_or_error.is_failure() {
            return Err(UseCaseError::EmailInvalid(request.email));
        }

        let password_or_error = Password::create(request.password);

        combine([email_or_error.check(), password_or_error.check()])?;

        let email = email_or_error?;
        let password = password_or_error?;
        let email_text = email.as_str().to_string();

        if self.email_in_use(&email).await? {
            tracing::info!("Signup rejected, email already in use");
            return Err(UseCaseError::EmailAlreadyInUse(email_text));
        }

        // A failed entity construction ends the signup here. Nothing unvalidated may
        // reach the repository.
        let user = User::create(UserProps {
            username: email,
            first_name: request.first_name,
            last_name: request.last_name,
        })?;

        let created_user = match self.user_repository.create(user, password).await {
            Ok(created_user) => created_user,
            Err(UserRepositoryError::UserAlreadyExists) => {
                return Err(UseCaseError::EmailAlreadyInUse(email_text));
            }
            Err(e) => return Err(UseCaseError::unexpected(e)),
        };

        self.verification_service
            .send_verification_email(&created_user);

        tracing::info!(user_id = %created_user.id(), "User signed up");

        Ok(SignUpResponseDto::from(&created_user))
    }
}
