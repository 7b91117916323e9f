use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use identity_core::{UserId, VerificationToken, VerificationTokenStore, VerificationTokenStoreError};
use tokio::sync::RwLock;
use tokio::time::Instant;

#[derive(Clone)]
pub struct HashMapVerificationTokenStore {
    tokens: Arc<RwLock<HashMap<String, (UserId, Instant)>>>,
    ttl: Duration,
}

impl HashMapVerificationTokenStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            tokens: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }
}

#[async_trait::async_trait]
impl VerificationTokenStore for HashMapVerificationTokenStore {
    async fn issue(&self, user_id: UserId) -> Result<VerificationToken, VerificationTokenStoreError> {
        let token = VerificationToken::new();
        let expires_at = Instant::now() + self.ttl;

        let mut tokens = self.tokens.write().await;
        tokens.retain(|_, (_, expiry)| *expiry > Instant::now());
        tokens.insert(token.as_str().to_string(), (user_id, expires_at));

        Ok(token)
    }

    async fn peek(
        &self,
        token: &VerificationToken,
    ) -> Result<Option<UserId>, VerificationTokenStoreError> {
        Ok(self
            .tokens
            .read()
            .await
            .get(token.as_str())
            .filter(|(_, expires_at)| *expires_at > Instant::now())
            .map(|(user_id, _)| *user_id))
    }

    async fn consume(
        &self,
        token: &VerificationToken,
    ) -> Result<Option<UserId>, VerificationTokenStoreError> {
        let entry = self.tokens.write().await.remove(token.as_str());

        Ok(entry
            .filter(|(_, expires_at)| *expires_at > Instant::now())
            .map(|(user_id, _)| user_id))
    }
}
