use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use identity_core::{PersistedUser, SessionError, SessionId, SessionLayer, UserId};
use tokio::time::Instant;

struct SessionEntry {
    user_id: UserId,
    expires_at: Instant,
}

/// Sessions held in process memory; lost on restart.
#[derive(Clone)]
pub struct DashMapSessionStore {
    sessions: Arc<DashMap<String, SessionEntry>>,
    ttl: Duration,
}

impl DashMapSessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            ttl,
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[async_trait::async_trait]
impl SessionLayer for DashMapSessionStore {
    async fn log_in(&self, user: &PersistedUser) -> Result<SessionId, SessionError> {
        let now = Instant::now();
        self.sessions.retain(|_, entry| entry.expires_at > now);

        let session_id = SessionId::new();
        self.sessions.insert(
            session_id.as_str().to_string(),
            SessionEntry {
                user_id: *user.id(),
                expires_at: now + self.ttl,
            },
        );

        Ok(session_id)
    }

    async fn principal(&self, session_id: &SessionId) -> Result<Option<UserId>, SessionError> {
        let now = Instant::now();
        // Expired entries are dropped on read.
        let removed = self
            .sessions
            .remove_if(session_id.as_str(), |_, entry| entry.expires_at <= now);
        if removed.is_some() {
            return Ok(None);
        }

        Ok(self
            .sessions
            .get(session_id.as_str())
            .map(|entry| entry.user_id))
    }

    async fn log_out(&self, session_id: &SessionId) -> Result<(), SessionError> {
        self.sessions.remove(session_id.as_str());
        Ok(())
    }
}
