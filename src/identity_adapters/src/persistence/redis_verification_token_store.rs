use std::sync::Arc;
use std::time::Duration;

use identity_core::{UserId, VerificationToken, VerificationTokenStore, VerificationTokenStoreError};
use redis::{Commands, Connection};
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct RedisVerificationTokenStore {
    conn: Arc<RwLock<Connection>>,
    ttl: Duration,
}

impl RedisVerificationTokenStore {
    pub fn new(conn: Arc<RwLock<Connection>>, ttl: Duration) -> Self {
        Self { conn, ttl }
    }
}

#[async_trait::async_trait]
impl VerificationTokenStore for RedisVerificationTokenStore {
    #[tracing::instrument(name = "Issuing verification token in Redis", skip_all)]
    async fn issue(&self, user_id: UserId) -> Result<VerificationToken, VerificationTokenStoreError> {
        let token = VerificationToken::new();
        let key = get_key(token.as_str());

        let mut conn = self.conn.write().await;
        conn.set_ex::<_, _, ()>(key, user_id.to_string(), self.ttl.as_secs())
            .map_err(|e| VerificationTokenStoreError::UnexpectedError(e.to_string()))?;

        Ok(token)
    }

    #[tracing::instrument(name = "Reading verification token from Redis", skip_all)]
    async fn peek(
        &self,
        token: &VerificationToken,
    ) -> Result<Option<UserId>, VerificationTokenStoreError> {
        let key = get_key(token.as_str());

        let mut conn = self.conn.write().await;
        let stored: Option<String> = conn
            .get(key)
            .map_err(|e| VerificationTokenStoreError::UnexpectedError(e.to_string()))?;

        parse_user_id(stored)
    }

    #[tracing::instrument(name = "Consuming verification token in Redis", skip_all)]
    async fn consume(
        &self,
        token: &VerificationToken,
    ) -> Result<Option<UserId>, VerificationTokenStoreError> {
        let key = get_key(token.as_str());

        let mut conn = self.conn.write().await;
        let stored: Option<String> = conn
            .get_del(key)
            .map_err(|e| VerificationTokenStoreError::UnexpectedError(e.to_string()))?;

        parse_user_id(stored)
    }
}

fn parse_user_id(stored: Option<String>) -> Result<Option<UserId>, VerificationTokenStoreError> {
    stored
        .map(|raw| {
            UserId::try_from(raw.as_str())
                .map_err(|e| VerificationTokenStoreError::UnexpectedError(e.to_string()))
        })
        .transpose()
}

const VERIFICATION_TOKEN_KEY_PREFIX: &str = "verification_token:";

fn get_key(token: &str) -> String {
    format!("{}{}", VERIFICATION_TOKEN_KEY_PREFIX, token)
}
