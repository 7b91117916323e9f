use std::sync::{Arc, Mutex};

use identity_core::{EmailClient, UserEmail};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    pub recipient: String,
    pub subject: String,
    pub content: String,
}

/// Records every message instead of delivering it.
#[derive(Debug, Clone, Default)]
pub struct MockEmailClient {
    sent: Arc<Mutex<Vec<SentEmail>>>,
}

impl MockEmailClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent
            .lock()
            .map(|sent| sent.clone())
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl EmailClient for MockEmailClient {
    async fn send_email(
        &self,
        recipient: &UserEmail,
        subject: &str,
        content: &str,
    ) -> Result<(), String> {
        tracing::debug!(subject, "Recording email instead of sending it");
        self.sent
            .lock()
            .map_err(|e| e.to_string())?
            .push(SentEmail {
                recipient: recipient.as_str().to_string(),
                subject: subject.to_string(),
                content: content.to_string(),
            });
        Ok(())
    }
}
