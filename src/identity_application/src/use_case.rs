use async_trait::async_trait;
use identity_core::UseCaseError;

/// Uniform shape of every application operation.
///
/// Implementations always return a `Result`: expected failures are named
/// [`UseCaseError`] variants and collaborator faults are folded into
/// [`UseCaseError::UnexpectedError`], so the transport layer never has to deal
/// with anything else.
#[async_trait]
pub trait UseCase: Send + Sync {
    type Request: Send;
    type Response: Send;

    async fn execute(&self, request: Self::Request) -> Result<Self::Response, UseCaseError>;
}
