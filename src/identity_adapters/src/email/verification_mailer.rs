use identity_core::{
    EmailClient, EmailVerificationService, PersistedUser, VerificationToken,
    VerificationTokenStore,
};
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;

use crate::config::VERIFICATION_QUEUE_CAPACITY;

const VERIFICATION_SUBJECT: &str = "Confirm your email address";

/// Link the user follows to confirm their address.
pub fn verification_link(base_url: &str, token: &VerificationToken) -> String {
    format!(
        "{}/verify-email?token={}",
        base_url.trim_end_matches('/'),
        token.as_str()
    )
}

/// Hands new users to a background worker that issues a token and mails the link.
///
/// `send_verification_email` only enqueues, so signup never waits on the mail
/// provider. When the queue is full the mail is dropped and logged. The worker
/// stops once every mailer handle has been dropped.
#[derive(Clone)]
pub struct QueuedVerificationMailer {
    queue: mpsc::Sender<PersistedUser>,
}

impl QueuedVerificationMailer {
    pub fn spawn<T, E>(
        token_store: T,
        email_client: E,
        link_base_url: String,
    ) -> (Self, JoinHandle<()>)
    where
        T: VerificationTokenStore + 'static,
        E: EmailClient + 'static,
    {
        Self::spawn_with_capacity(
            token_store,
            email_client,
            link_base_url,
            VERIFICATION_QUEUE_CAPACITY,
        )
    }

    pub fn spawn_with_capacity<T, E>(
        token_store: T,
        email_client: E,
        link_base_url: String,
        capacity: usize,
    ) -> (Self, JoinHandle<()>)
    where
        T: VerificationTokenStore + 'static,
        E: EmailClient + 'static,
    {
        let (queue, mut pending) = mpsc::channel::<PersistedUser>(capacity.max(1));

        let worker = tokio::spawn(async move {
            while let Some(user) = pending.recv().await {
                deliver(&token_store, &email_client, &link_base_url, &user).await;
            }
            tracing::debug!("Verification mail queue closed");
        });

        (Self { queue }, worker)
    }
}

impl EmailVerificationService for QueuedVerificationMailer {
    fn send_verification_email(&self, user: &PersistedUser) {
        match self.queue.try_send(user.clone()) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                tracing::error!(user_id = %user.id(), "Verification mail queue full, mail dropped");
            }
            Err(TrySendError::Closed(_)) => {
                tracing::error!(user_id = %user.id(), "Verification mail worker is gone, mail dropped");
            }
        }
    }
}

#[tracing::instrument(name = "Delivering verification email", skip_all, fields(user_id = %user.id()))]
async fn deliver<T, E>(token_store: &T, email_client: &E, link_base_url: &str, user: &PersistedUser)
where
    T: VerificationTokenStore,
    E: EmailClient,
{
    let token = match token_store.issue(*user.id()).await {
        Ok(token) => token,
        Err(e) => {
            tracing::error!(error = %e, "Failed to issue verification token");
            return;
        }
    };

    let link = verification_link(link_base_url, &token);
    let content = format!(
        "Welcome {}! Confirm your email address by opening {}",
        user.user().first_name(),
        link
    );

    if let Err(e) = email_client
        .send_email(user.username(), VERIFICATION_SUBJECT, &content)
        .await
    {
        tracing::error!(error = %e, "Failed to send verification email");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::email::MockEmailClient;
    use crate::persistence::HashMapVerificationTokenStore;
    use chrono::Utc;
    use identity_core::{User, UserEmail, UserId};
    use std::time::Duration;

    fn user() -> PersistedUser {
        let user = User::restore(UserEmail::create("new@x.com").unwrap(), "Ada", "B", false).unwrap();
        PersistedUser::new(UserId::new(), user, Utc::now())
    }

    #[test]
    fn link_has_no_double_slash() {
        let token = VerificationToken::new();
        assert_eq!(
            verification_link("http://localhost:3000/", &token),
            format!("http://localhost:3000/verify-email?token={}", token.as_str())
        );
    }

    #[tokio::test]
    async fn test_mail_carries_a_consumable_token() {
        let tokens = HashMapVerificationTokenStore::new(Duration::from_secs(60));
        let client = MockEmailClient::new();
        let (mailer, worker) = QueuedVerificationMailer::spawn(
            tokens.clone(),
            client.clone(),
            "http://localhost:3000".to_string(),
        );
        let user = user();

        mailer.send_verification_email(&user);
        drop(mailer);
        worker.await.unwrap();

        let sent = client.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].recipient, "new@x.com");
        assert_eq!(sent[0].subject, VERIFICATION_SUBJECT);

        let raw_token = sent[0]
            .content
            .rsplit("token=")
            .next()
            .unwrap();
        let token = VerificationToken::parse(raw_token).unwrap();
        assert_eq!(tokens.consume(&token).await.unwrap(), Some(*user.id()));
    }

    #[tokio::test]
    async fn test_full_queue_drops_mail() {
        let client = MockEmailClient::new();
        let (mailer, worker) = QueuedVerificationMailer::spawn_with_capacity(
            HashMapVerificationTokenStore::new(Duration::from_secs(60)),
            client.clone(),
            "http://localhost:3000".to_string(),
            1,
        );

        // The worker cannot drain the queue before the first await.
        for _ in 0..3 {
            mailer.send_verification_email(&user());
        }
        drop(mailer);
        worker.await.unwrap();

        assert_eq!(client.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_enqueue_after_worker_stopped_does_not_panic() {
        let (mailer, worker) = QueuedVerificationMailer::spawn(
            HashMapVerificationTokenStore::new(Duration::from_secs(60)),
            MockEmailClient::new(),
            "http://localhost:3000".to_string(),
        );
        worker.abort();
        let _ = worker.await;

        mailer.send_verification_email(&user());
    }
}
