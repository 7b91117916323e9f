use std::sync::Arc;
use std::time::Duration;

use identity_core::{PersistedUser, SessionError, SessionId, SessionLayer, UserId};
use redis::{Commands, Connection};
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct RedisSessionStore {
    conn: Arc<RwLock<Connection>>,
    ttl: Duration,
}

impl RedisSessionStore {
    pub fn new(conn: Arc<RwLock<Connection>>, ttl: Duration) -> Self {
        Self { conn, ttl }
    }
}

#[async_trait::async_trait]
impl SessionLayer for RedisSessionStore {
    #[tracing::instrument(name = "Creating session in Redis", skip_all)]
    async fn log_in(&self, user: &PersistedUser) -> Result<SessionId, SessionError> {
        let session_id = SessionId::new();
        let key = get_key(session_id.as_str());

        let mut conn = self.conn.write().await;
        conn.set_ex::<_, _, ()>(key, user.id().to_string(), self.ttl.as_secs())
            .map_err(|e| SessionError::StoreError(e.to_string()))?;

        Ok(session_id)
    }

    #[tracing::instrument(name = "Reading session from Redis", skip_all)]
    async fn principal(&self, session_id: &SessionId) -> Result<Option<UserId>, SessionError> {
        let key = get_key(session_id.as_str());

        let mut conn = self.conn.write().await;
        let stored: Option<String> = conn
            .get(key)
            .map_err(|e| SessionError::StoreError(e.to_string()))?;

        stored
            .map(|raw| {
                UserId::try_from(raw.as_str()).map_err(|e| SessionError::StoreError(e.to_string()))
            })
            .transpose()
    }

    #[tracing::instrument(name = "Deleting session from Redis", skip_all)]
    async fn log_out(&self, session_id: &SessionId) -> Result<(), SessionError> {
        let key = get_key(session_id.as_str());

        let mut conn = self.conn.write().await;
        conn.del::<_, ()>(key)
            .map_err(|e| SessionError::StoreError(e.to_string()))
    }
}

const SESSION_KEY_PREFIX: &str = "session:";

fn get_key(session_id: &str) -> String {
    format!("{}{}", SESSION_KEY_PREFIX, session_id)
}
