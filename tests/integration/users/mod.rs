//! User profile endpoint integration tests
//!
//! - GET /api/v1/users/{id}
//! - PUT /api/v1/users/{id}

use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::common::{assertions, get_request, json_request, TestApp};

#[tokio::test]
async fn test_get_user_requires_auth() {
    let app = TestApp::new();
    let fixture = app.register("alice@example.com", "alice").await.unwrap();

    let response = app
        .send(get_request(&format!("/api/v1/users/{}", fixture.id), None))
        .await
        .unwrap();
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_get_other_user() {
    let app = TestApp::new();
    let alice = app.register("alice@example.com", "alice").await.unwrap();
    let bob = app.register("bob@example.com", "bob").await.unwrap();

    let response = app
        .send(get_request(
            &format!("/api/v1/users/{}", bob.id),
            Some(&alice.token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["username"], "bob");
}

#[tokio::test]
async fn test_update_own_profile() {
    let app = TestApp::new();
    let alice = app.register("alice@example.com", "alice").await.unwrap();
    let uri = format!("/api/v1/users/{}", alice.id);

    let response = app
        .send(json_request(
            Method::PUT,
            &uri,
            Some(&alice.token),
            json!({ "avatar": "https://img.example.com/alice.png" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["avatar"], "https://img.example.com/alice.png");
    assert_eq!(response.body["username"], "alice");

    // Empty values leave the stored profile unchanged
    let response = app
        .send(json_request(
            Method::PUT,
            &uri,
            Some(&alice.token),
            json!({ "username": "", "avatar": "" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["username"], "alice");
    assert_eq!(response.body["avatar"], "https://img.example.com/alice.png");
}

#[tokio::test]
async fn test_update_other_user_is_forbidden() {
    let app = TestApp::new();
    let alice = app.register("alice@example.com", "alice").await.unwrap();
    let bob = app.register("bob@example.com", "bob").await.unwrap();

    let response = app
        .send(json_request(
            Method::PUT,
            &format!("/api/v1/users/{}", bob.id),
            Some(&alice.token),
            json!({ "username": "mallory" }),
        ))
        .await
        .unwrap();
    assertions::assert_error(&response, StatusCode::FORBIDDEN, "AUTHORIZATION_ERROR");

    let bob_now = app
        .send(get_request(
            &format!("/api/v1/users/{}", bob.id),
            Some(&bob.token),
        ))
        .await
        .unwrap();
    assert_eq!(bob_now.body["username"], "bob");
}
