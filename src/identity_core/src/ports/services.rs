use async_trait::async_trait;

use crate::domain::{email::UserEmail, user::PersistedUser};

/// Port trait for email sending service
#[async_trait]
pub trait EmailClient: Send + Sync {
    async fn send_email(
        &self,
        recipient: &UserEmail,
        subject: &str,
        content: &str,
    ) -> Result<(), String>;
}

/// Sends the "confirm your address" message to a freshly created user.
///
/// Fire-and-forget: the call returns immediately and delivery failures never
/// reach the caller. Retries, if any, are the implementation's concern.
pub trait EmailVerificationService: Send + Sync {
    fn send_verification_email(&self, user: &PersistedUser);
}
