mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{json_request, register, send, test_app, PASSWORD};

#[tokio::test]
async fn health_endpoints_respond() {
    let app = test_app();

    for uri in ["/health", "/api/health"] {
        let (status, body) = send(&app, json_request("GET", uri, None, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Todo App Backend is running!");
        assert_eq!(body["store"], "memory");
    }

    let (status, body) = send(&app, json_request("GET", "/", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Digital Desk API");
}

#[tokio::test]
async fn register_returns_token_and_public_user() {
    let app = test_app();

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/users/register",
            None,
            Some(json!({ "username": "alice", "email": "alice@example.com", "password": PASSWORD })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(body["user"]["username"], "alice");
    assert!(body["user"].get("passwordHash").is_none());
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn duplicate_registration_conflicts() {
    let app = test_app();
    register(&app, "alice").await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/users/register",
            None,
            Some(json!({ "username": "alice", "email": "other@example.com", "password": PASSWORD })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT, "{}", body);
}

#[tokio::test]
async fn weak_password_and_bad_email_are_field_errors() {
    let app = test_app();

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/users/register",
            None,
            Some(json!({ "username": "alice", "email": "not-an-email", "password": "short" })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["field_errors"].get("email").is_some(), "{}", body);
    assert!(body["field_errors"].get("password").is_some(), "{}", body);
}

#[tokio::test]
async fn login_by_username_or_email() {
    let app = test_app();
    register(&app, "alice").await;

    for login in ["alice", "alice@example.com", "ALICE@example.com"] {
        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/api/users/login",
                None,
                Some(json!({ "login": login, "password": PASSWORD })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "login as {}: {}", login, body);
        assert_eq!(body["user"]["username"], "alice");
    }

    // Older clients send `username`
    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/users/login",
            None,
            Some(json!({ "username": "alice", "password": PASSWORD })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn bad_credentials_look_the_same() {
    let app = test_app();
    register(&app, "alice").await;

    let (wrong_status, wrong_body) = send(
        &app,
        json_request(
            "POST",
            "/api/users/login",
            None,
            Some(json!({ "login": "alice", "password": "Wrong1!x" })),
        ),
    )
    .await;
    let (unknown_status, unknown_body) = send(
        &app,
        json_request(
            "POST",
            "/api/users/login",
            None,
            Some(json!({ "login": "mallory", "password": PASSWORD })),
        ),
    )
    .await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_body["message"], unknown_body["message"]);
}

#[tokio::test]
async fn profile_needs_token() {
    let app = test_app();
    let token = register(&app, "alice").await;

    let (status, _) = send(&app, json_request("GET", "/api/users/profile", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(&app, json_request("GET", "/api/users/profile", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "alice@example.com");
}

#[tokio::test]
async fn registration_can_be_disabled() {
    let mut config = digital_desk::config::AppConfig::for_testing();
    config.security.allow_registration = false;
    let app = digital_desk::app(digital_desk::AppState::in_memory(config));

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/users/register",
            None,
            Some(json!({ "username": "alice", "email": "alice@example.com", "password": PASSWORD })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn email_is_unique_regardless_of_case() {
    let app = test_app();

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/users/register",
            None,
            Some(json!({ "username": "alice", "email": "Alice@Example.com", "password": PASSWORD })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"]["email"], "alice@example.com");

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/users/register",
            None,
            Some(json!({ "username": "alice2", "email": "alice@example.com", "password": PASSWORD })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/users/login",
            None,
            Some(json!({ "login": "ALICE@example.com", "password": PASSWORD })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}
