use identity_core::{EmailClient, UserEmail};
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, Secret};

use crate::config::EmailClientSettings;

const EMAIL_ENDPOINT: &str = "/email";
const MESSAGE_STREAM: &str = "outbound";
const POSTMARK_AUTH_HEADER: &str = "X-Postmark-Server-Token";

#[derive(Debug, thiserror::Error)]
pub enum PostmarkError {
    #[error("Invalid Postmark base url {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("Invalid sender address: {0}")]
    InvalidSender(String),
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Delivers mail through the Postmark HTTP API.
pub struct PostmarkEmailClient {
    http_client: Client,
    endpoint: Url,
    sender: UserEmail,
    authorization_token: Secret<String>,
}

impl PostmarkEmailClient {
    /// Fails when `base_url` cannot be resolved to the send endpoint.
    pub fn new(
        base_url: &str,
        sender: UserEmail,
        authorization_token: Secret<String>,
        http_client: Client,
    ) -> Result<Self, PostmarkError> {
        let endpoint = Url::parse(base_url)
            .and_then(|base| base.join(EMAIL_ENDPOINT))
            .map_err(|e| PostmarkError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            http_client,
            endpoint,
            sender,
            authorization_token,
        })
    }

    pub fn from_settings(settings: &EmailClientSettings) -> Result<Self, PostmarkError> {
        let sender = UserEmail::create(&settings.sender)
            .map_err(|e| PostmarkError::InvalidSender(e.to_string()))?;
        let http_client = Client::builder().timeout(settings.timeout()).build()?;

        Self::new(
            &settings.base_url,
            sender,
            settings.auth_token.clone(),
            http_client,
        )
    }

    fn message<'a>(
        &'a self,
        recipient: &'a UserEmail,
        subject: &'a str,
        content: &'a str,
    ) -> SendEmailRequest<'a> {
        SendEmailRequest {
            from: self.sender.as_str(),
            to: recipient.as_str(),
            subject,
            html_body: content,
            text_body: content,
            message_stream: MESSAGE_STREAM,
        }
    }
}

#[async_trait::async_trait]
impl EmailClient for PostmarkEmailClient {
    #[tracing::instrument(name = "Sending email via Postmark", skip_all)]
    async fn send_email(
        &self,
        recipient: &UserEmail,
        subject: &str,
        content: &str,
    ) -> Result<(), String> {
        let response = self
            .http_client
            .post(self.endpoint.clone())
            .header(
                POSTMARK_AUTH_HEADER,
                self.authorization_token.expose_secret(),
            )
            .json(&self.message(recipient, subject, content))
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if let Err(e) = response.error_for_status_ref() {
            tracing::debug!(status = %response.status(), "Postmark rejected the message");
            return Err(e.to_string());
        }

        Ok(())
    }
}

#[derive(serde::Serialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html_body: &'a str,
    text_body: &'a str,
    message_stream: &'a str,
}
