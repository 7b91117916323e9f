use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    token::SessionId,
    user::{PersistedUser, UserId},
};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session store error: {0}")]
    StoreError(String),
}

/// Server-side sessions keyed by an opaque id.
///
/// A session holds only the principal's [`UserId`]; the user itself is
/// re-hydrated from the repository on every lookup.
#[async_trait]
pub trait SessionLayer: Send + Sync {
    async fn log_in(&self, user: &PersistedUser) -> Result<SessionId, SessionError>;
    async fn principal(&self, session_id: &SessionId) -> Result<Option<UserId>, SessionError>;
    async fn log_out(&self, session_id: &SessionId) -> Result<(), SessionError>;
}
