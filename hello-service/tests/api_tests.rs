mod common;

use chrono::Duration;
use chrono::Utc;
use common::TestApp;
use reqwest::header::WWW_AUTHENTICATE;
use reqwest::StatusCode;

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::spawn().await;

    let response = app.login("farhan", "123").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 200);
    assert_eq!(body["data"]["token_type"], "Bearer");
    assert!(body["data"]["expires_at"].is_string());

    let token = body["data"]["token"].as_str().expect("Missing token");
    let claims = app
        .authenticator
        .validate_token(token)
        .expect("Issued token does not verify");
    assert_eq!(claims.sub, "farhan");
    assert_eq!(claims.exp - claims.iat, 60 * 60);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::spawn().await;

    let unknown_user = app.login("nobody", "123").await;
    let wrong_password = app.login("farhan", "wrong").await;

    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);

    let unknown_user: serde_json::Value = unknown_user.json().await.unwrap();
    let wrong_password: serde_json::Value = wrong_password.json().await.unwrap();
    assert_eq!(unknown_user, wrong_password);
    assert_eq!(unknown_user["data"]["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_login_malformed_body() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/login")
        .json(&serde_json::json!({ "username": "farhan" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_hello_with_token() {
    let app = TestApp::spawn().await;
    let token = app.login_token().await;

    let response = app
        .get("/hello")
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Hello");
    assert_eq!(body["data"]["username"], "farhan");
}

#[tokio::test]
async fn test_hello_without_header() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/hello")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response
            .headers()
            .get(WWW_AUTHENTICATE)
            .and_then(|value| value.to_str().ok()),
        Some("Bearer")
    );

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Authentication required");
}

#[tokio::test]
async fn test_hello_with_garbage_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/hello")
        .header("Authorization", "Bearer garbage")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_hello_with_expired_token() {
    let app = TestApp::spawn().await;

    let expired = app
        .authenticator
        .generate_token_at("farhan", Utc::now() - Duration::hours(2))
        .expect("Failed to generate token");

    let response = app
        .get("/hello")
        .bearer_auth(&expired.access_token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_hello_with_tampered_token() {
    let app = TestApp::spawn().await;
    let token = app.login_token().await;

    let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
    // Keep the signature, swap in the payload of a token for another subject
    let forged = app
        .authenticator
        .generate_token("admin")
        .expect("Failed to generate token");
    parts[1] = forged
        .access_token
        .split('.')
        .nth(1)
        .expect("Token has a payload")
        .to_string();
    let tampered = parts.join(".");

    let response = app
        .get("/hello")
        .bearer_auth(&tampered)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_hello_with_non_bearer_scheme() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/hello")
        .basic_auth("farhan", Some("123"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_is_open_with_invalid_token() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/login")
        .header("Authorization", "Bearer garbage")
        .json(&serde_json::json!({ "username": "farhan", "password": "123" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unmatched_route_requires_authentication() {
    let app = TestApp::spawn().await;

    let anonymous = app
        .get("/nope")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    let token = app.login_token().await;
    let authenticated = app
        .get("/nope")
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(authenticated.status(), StatusCode::NOT_FOUND);
}
