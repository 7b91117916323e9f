//! Hand-written port doubles shared by the use-case tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use identity_core::{
    AuthenticationStrategy, Credentials, EmailVerificationService, Password, PersistedUser,
    SessionError, SessionId, SessionLayer, User, UserEmail, UserId, UserRepository,
    UserRepositoryError, VerificationToken, VerificationTokenStore, VerificationTokenStoreError,
};
use secrecy::ExposeSecret;
use tokio::sync::RwLock;

pub fn persisted_user(email: &str, verified: bool) -> PersistedUser {
    let user = User::restore(UserEmail::create(email).unwrap(), "A", "B", verified).unwrap();
    PersistedUser::new(UserId::new(), user, Utc::now())
}

#[derive(Clone, Default)]
pub struct MockUserRepository {
    pub users: Arc<RwLock<HashMap<UserEmail, PersistedUser>>>,
    pub passwords: Arc<RwLock<HashMap<UserEmail, String>>>,
    pub create_calls: Arc<AtomicUsize>,
    pub fail_next_mark_verified: Arc<AtomicBool>,
    pub unreachable: bool,
    pub reject_create_as_duplicate: bool,
}

impl MockUserRepository {
    pub async fn with_user(user: PersistedUser) -> Self {
        let repository = Self::default();
        repository
            .users
            .write()
            .await
            .insert(user.username().clone(), user);
        repository
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl UserRepository for MockUserRepository {
    async fn exists(&self, email: &UserEmail) -> Result<bool, UserRepositoryError> {
        if self.unreachable {
            return Err(UserRepositoryError::UnexpectedError(
                "connection refused".to_string(),
            ));
        }
        Ok(self.users.read().await.contains_key(email))
    }

    async fn create(
        &self,
        user: User,
        password: Password,
    ) -> Result<PersistedUser, UserRepositoryError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if self.reject_create_as_duplicate {
            return Err(UserRepositoryError::UserAlreadyExists);
        }

        let email = user.username().clone();
        let persisted = PersistedUser::new(UserId::new(), user, Utc::now());
        self.users
            .write()
            .await
            .insert(email.clone(), persisted.clone());
        self.passwords
            .write()
            .await
            .insert(email, password.as_ref().expose_secret().clone());
        Ok(persisted)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<PersistedUser>, UserRepositoryError> {
        if self.unreachable {
            return Err(UserRepositoryError::UnexpectedError(
                "connection refused".to_string(),
            ));
        }
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| user.id() == id)
            .cloned())
    }

    async fn mark_verified(&self, id: &UserId) -> Result<PersistedUser, UserRepositoryError> {
        if self.fail_next_mark_verified.swap(false, Ordering::SeqCst) {
            return Err(UserRepositoryError::UnexpectedError("db timeout".to_string()));
        }
        let mut users = self.users.write().await;
        let user = users
            .values_mut()
            .find(|user| user.id() == id)
            .ok_or(UserRepositoryError::UserNotFound)?;
        user.verify();
        Ok(user.clone())
    }
}

#[derive(Clone, Default)]
pub struct MockVerificationService {
    pub sent_to: Arc<Mutex<Vec<UserId>>>,
}

impl MockVerificationService {
    pub fn sent_to(&self) -> Vec<UserId> {
        self.sent_to.lock().unwrap().clone()
    }
}

impl EmailVerificationService for MockVerificationService {
    fn send_verification_email(&self, user: &PersistedUser) {
        self.sent_to.lock().unwrap().push(*user.id());
    }
}

#[derive(Debug, thiserror::Error)]
#[error("strategy exploded")]
pub struct StrategyFailure;

/// Strategy double that answers from a fixed user/password pair.
#[derive(Clone)]
pub struct MockStrategy {
    pub user: Option<(PersistedUser, String)>,
    pub fails: bool,
}

#[async_trait::async_trait]
impl AuthenticationStrategy for MockStrategy {
    type Error = StrategyFailure;

    async fn authenticate(
        &self,
        credentials: Credentials,
    ) -> Result<Option<PersistedUser>, Self::Error> {
        if self.fails {
            return Err(StrategyFailure);
        }

        Ok(self.user.as_ref().and_then(|(user, password)| {
            let email_matches = user.username().as_str() == credentials.email.expose_secret();
            let password_matches = password == credentials.password.expose_secret();
            (email_matches && password_matches).then(|| user.clone())
        }))
    }
}

#[derive(Clone, Default)]
pub struct MockSessionLayer {
    pub sessions: Arc<RwLock<HashMap<String, UserId>>>,
    pub fails: bool,
}

impl MockSessionLayer {
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait::async_trait]
impl SessionLayer for MockSessionLayer {
    async fn log_in(&self, user: &PersistedUser) -> Result<SessionId, SessionError> {
        if self.fails {
            return Err(SessionError::StoreError("session store offline".to_string()));
        }
        let session_id = SessionId::new();
        self.sessions
            .write()
            .await
            .insert(session_id.as_str().to_string(), *user.id());
        Ok(session_id)
    }

    async fn principal(&self, session_id: &SessionId) -> Result<Option<UserId>, SessionError> {
        Ok(self.sessions.read().await.get(session_id.as_str()).copied())
    }

    async fn log_out(&self, session_id: &SessionId) -> Result<(), SessionError> {
        self.sessions.write().await.remove(session_id.as_str());
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MockVerificationTokenStore {
    pub tokens: Arc<RwLock<HashMap<String, UserId>>>,
}

#[async_trait::async_trait]
impl VerificationTokenStore for MockVerificationTokenStore {
    async fn issue(&self, user_id: UserId) -> Result<VerificationToken, VerificationTokenStoreError> {
        let token = VerificationToken::new();
        self.tokens
            .write()
            .await
            .insert(token.as_str().to_string(), user_id);
        Ok(token)
    }

    async fn peek(
        &self,
        token: &VerificationToken,
    ) -> Result<Option<UserId>, VerificationTokenStoreError> {
        Ok(self.tokens.read().await.get(token.as_str()).copied())
    }

    async fn consume(
        &self,
        token: &VerificationToken,
    ) -> Result<Option<UserId>, VerificationTokenStoreError> {
        Ok(self.tokens.write().await.remove(token.as_str()))
    }
}
