//! Integration tests for login, logout, sessions and throttling.

use http::StatusCode;
use serde_json::json;

use crate::helpers::{test_app_or_skip, unique};

#[tokio::test]
async fn test_login_success_returns_token_role_and_user() {
    let app = test_app_or_skip!();
    let username = unique("login-ok");
    app.create_test_account(&username, "password123", "viewer")
        .await;

    let response = app
        .request(
            "POST",
            "/api/login",
            Some(json!({ "username": username, "password": "password123" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], json!(true));
    assert_eq!(response.body["role"], json!("viewer"));
    assert!(response.body["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(response.body["user"]["username"], json!(username));
}

#[tokio::test]
async fn test_login_failures_are_uniform() {
    let app = test_app_or_skip!();
    let username = unique("login-bad");
    app.create_test_account(&username, "password123", "viewer")
        .await;

    let wrong_password = app
        .request(
            "POST",
            "/api/login",
            Some(json!({ "username": username, "password": "not-it" })),
            None,
        )
        .await;
    let unknown_user = app
        .request(
            "POST",
            "/api/login",
            Some(json!({ "username": unique("nobody"), "password": "not-it" })),
            None,
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.error_code(), Some("INVALID_CREDENTIALS"));
    // Unknown usernames and wrong passwords must be indistinguishable.
    assert_eq!(wrong_password.body, unknown_user.body);
}

#[tokio::test]
async fn test_me_reflects_the_session() {
    let app = test_app_or_skip!();
    let username = unique("me-user");
    app.create_test_account(&username, "password123", "search")
        .await;
    let token = app.login(&username, "password123").await;

    let response = app.request("GET", "/api/me", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["user"]["username"], json!(username));
    assert_eq!(response.body["user"]["role"], json!("search"));
}

#[tokio::test]
async fn test_me_without_session_is_null_not_401() {
    let app = test_app_or_skip!();

    let response = app.request("GET", "/api/me", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["user"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_tampered_token_reads_as_absent() {
    let app = test_app_or_skip!();

    let response = app
        .request("GET", "/api/me", None, Some("forged-token-000"))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["user"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_logout_destroys_the_session() {
    let app = test_app_or_skip!();
    let username = unique("logout-user");
    app.create_test_account(&username, "password123", "viewer")
        .await;
    let token = app.login(&username, "password123").await;

    let logout = app.request("POST", "/api/logout", None, Some(&token)).await;
    assert_eq!(logout.status, StatusCode::OK);

    let me = app.request("GET", "/api/me", None, Some(&token)).await;
    assert_eq!(me.body["user"], serde_json::Value::Null);

    // Idempotent: a second logout with the dead token is just a 401,
    // never an error about missing state.
    let again = app.request("POST", "/api/logout", None, Some(&token)).await;
    assert_eq!(again.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_gated_route_without_session_is_401() {
    let app = test_app_or_skip!();

    let response = app.request("GET", "/api/admin/users", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), Some("UNAUTHENTICATED"));
}

#[tokio::test]
async fn test_login_throttled_after_budget() {
    let app = test_app_or_skip!();
    let username = unique("throttle-user");
    app.create_test_account(&username, "password123", "viewer")
        .await;

    // Default budget is 10 attempts per window; all from one client key.
    for _ in 0..10 {
        let response = app
            .request(
                "POST",
                "/api/login",
                Some(json!({ "username": username, "password": "wrong" })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    }

    // The (N+1)-th attempt is refused even with the right password.
    let response = app
        .request(
            "POST",
            "/api/login",
            Some(json!({ "username": username, "password": "password123" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(response.error_code(), Some("THROTTLED"));
}

#[tokio::test]
async fn test_concurrent_logins_produce_independent_sessions() {
    let app = test_app_or_skip!();
    let username = unique("multi-login");
    app.create_test_account(&username, "password123", "viewer")
        .await;

    let first = app.login(&username, "password123").await;
    let second = app.login(&username, "password123").await;
    assert_ne!(first, second);

    // Ending one session leaves the other live.
    app.request("POST", "/api/logout", None, Some(&first)).await;

    let me = app.request("GET", "/api/me", None, Some(&second)).await;
    assert_eq!(me.body["user"]["username"], json!(username));
}
