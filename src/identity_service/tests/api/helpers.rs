use std::time::Duration;

use identity_adapters::{
    DashMapSessionStore, HashMapVerificationTokenStore, InMemoryUserRepository, LocalStrategy,
    MockEmailClient, QueuedVerificationMailer, SessionCookie,
};
use identity_service::IdentityService;
use serde_json::{Value, json};
use tokio::net::TcpListener;

pub struct TestApp {
    pub address: String,
    pub http_client: reqwest::Client,
    pub emails: MockEmailClient,
}

impl TestApp {
    pub async fn new() -> Self {
        let users = InMemoryUserRepository::new();
        let tokens = HashMapVerificationTokenStore::new(Duration::from_secs(300));
        let sessions = DashMapSessionStore::new(Duration::from_secs(300));
        let emails = MockEmailClient::new();

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = format!("http://{}", listener.local_addr().unwrap());

        let (mailer, _worker) =
            QueuedVerificationMailer::spawn(tokens.clone(), emails.clone(), address.clone());

        let service = IdentityService::new(
            users.clone(),
            LocalStrategy::new(users),
            sessions,
            tokens,
            mailer,
            SessionCookie::new("identity_session", false),
        );

        tokio::spawn(service.run_standalone(listener, None));

        let http_client = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .unwrap();

        Self {
            address,
            http_client,
            emails,
        }
    }

    pub async fn post_signup(&self, body: &Value) -> reqwest::Response {
        self.http_client
            .post(format!("{}/signup", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_login(&self, email: &str, password: &str) -> reqwest::Response {
        self.http_client
            .post(format!("{}/login", &self.address))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_logout(&self) -> reqwest::Response {
        self.http_client
            .post(format!("{}/logout", &self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_me(&self) -> reqwest::Response {
        self.http_client
            .get(format!("{}/me", &self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_link(&self, link: &str) -> reqwest::Response {
        self.http_client
            .get(link)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// Waits for the background worker to deliver the mail for `email`.
    pub async fn verification_link(&self, email: &str) -> String {
        for _ in 0..100 {
            if let Some(mail) = self.emails.sent().into_iter().find(|m| m.recipient == email) {
                let start = mail.content.find("http").unwrap();
                return mail.content[start..].to_string();
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("no verification mail sent to {email}");
    }

    pub async fn signup_and_verify(&self, email: &str, password: &str) {
        let response = self.post_signup(&signup_body(email, password)).await;
        assert_eq!(response.status().as_u16(), 201);

        let link = self.verification_link(email).await;
        assert_eq!(self.get_link(&link).await.status().as_u16(), 200);
    }
}

pub fn signup_body(email: &str, password: &str) -> Value {
    json!({
        "email": email,
        "password": password,
        "firstName": "Ada",
        "lastName": "Lovelace",
    })
}
