use serde_json::Value;

use crate::helpers::{TestApp, signup_body};

#[tokio::test]
async fn should_return_401_with_distinct_type_if_not_verified() {
    let app = TestApp::new().await;
    app.post_signup(&signup_body("new@x.com", "pw")).await;

    let response = app.post_login("new@x.com", "pw").await;

    assert_eq!(response.status().as_u16(), 401);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["type"], "USER_ACCOUNT_NOT_VERIFIED");
}

#[tokio::test]
async fn should_return_401_if_incorrect_credentials() {
    let app = TestApp::new().await;
    app.signup_and_verify("a@x.com", "pw").await;

    for (email, password) in [("a@x.com", "wrong"), ("nobody@x.com", "pw")] {
        let response = app.post_login(email, password).await;
        assert_eq!(response.status().as_u16(), 401);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["type"], "AUTHENTICATION_FAILED");
    }
}

#[tokio::test]
async fn should_set_http_only_session_cookie() {
    let app = TestApp::new().await;
    app.signup_and_verify("a@x.com", "pw").await;

    let response = app.post_login("a@x.com", "pw").await;

    assert_eq!(response.status().as_u16(), 200);
    let cookie = response
        .cookies()
        .find(|cookie| cookie.name() == "identity_session")
        .expect("No session cookie found");
    assert!(cookie.http_only());
    assert!(!cookie.value().is_empty());
}
