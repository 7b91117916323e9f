use serde_json::Value;

use crate::helpers::TestApp;

#[tokio::test]
async fn signup_verify_login_me_logout() {
    let app = TestApp::new().await;
    app.signup_and_verify("ada@x.com", "engine").await;

    let response = app.post_login("ada@x.com", "engine").await;
    assert_eq!(response.status().as_u16(), 200);
    let login: Value = response.json().await.unwrap();
    assert_eq!(login["userDto"]["email"], "ada@x.com");
    assert_eq!(login["userDto"]["firstName"], "Ada");

    let response = app.get_me().await;
    assert_eq!(response.status().as_u16(), 200);
    let me: Value = response.json().await.unwrap();
    assert_eq!(me, login["userDto"]);

    assert_eq!(app.post_logout().await.status().as_u16(), 200);

    let response = app.get_me().await;
    assert_eq!(response.status().as_u16(), 401);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["type"], "SESSION_NOT_FOUND");

    // A second logout is harmless.
    assert_eq!(app.post_logout().await.status().as_u16(), 200);
}

#[tokio::test]
async fn verification_link_is_single_use() {
    let app = TestApp::new().await;
    app.signup_and_verify("ada@x.com", "engine").await;

    let link = app.verification_link("ada@x.com").await;
    let response = app.get_link(&link).await;

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["type"], "VERIFICATION_TOKEN_INVALID");
}
