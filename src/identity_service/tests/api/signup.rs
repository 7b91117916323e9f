use serde_json::{Value, json};

use crate::helpers::{TestApp, signup_body};

#[tokio::test]
async fn should_return_201_if_valid_input() {
    let app = TestApp::new().await;

    let response = app.post_signup(&signup_body("new@x.com", "p")).await;

    assert_eq!(response.status().as_u16(), 201);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({ "email": "new@x.com", "firstName": "Ada", "lastName": "Lovelace" })
    );
}

#[tokio::test]
async fn should_return_409_if_email_already_exists() {
    let app = TestApp::new().await;
    app.post_signup(&signup_body("taken@x.com", "p")).await;

    let response = app.post_signup(&signup_body("taken@x.com", "p")).await;

    assert_eq!(response.status().as_u16(), 409);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["type"], "EMAIL_ALREADY_IN_USE");
    assert_eq!(
        body["message"],
        "The email taken@x.com associated for this account already exists"
    );
}

#[tokio::test]
async fn should_return_400_if_invalid_input() {
    let app = TestApp::new().await;

    let test_cases = [
        (signup_body("not-an-email", "p"), "EMAIL_INVALID"),
        (signup_body("new@x.com", ""), "PASSWORD_INVALID"),
        (
            json!({ "email": "new@x.com", "password": "p", "firstName": " ", "lastName": "B" }),
            "USER_INVALID",
        ),
    ];

    for (body, expected_type) in test_cases {
        let response = app.post_signup(&body).await;
        assert_eq!(response.status().as_u16(), 400, "Failed for input: {body}");
        let error: Value = response.json().await.unwrap();
        assert_eq!(error["type"], expected_type);
    }
}

#[tokio::test]
async fn should_return_422_if_malformed_input() {
    let app = TestApp::new().await;

    let response = app.post_signup(&json!({ "email": "new@x.com" })).await;

    assert_eq!(response.status().as_u16(), 422);
}
