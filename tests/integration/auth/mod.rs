//! Authentication endpoint integration tests
//!
//! - POST /api/v1/auth/register
//! - POST /api/v1/auth/login
//! - GET /api/v1/auth/me
//! - POST /api/v1/auth/refresh

use axum::http::{header, Method, Request, StatusCode};
use axum::body::Body;
use serde_json::json;

use crate::common::{assertions, get_request, json_request, TestApp, TestConfig, TEST_PASSWORD};

mod test_register_and_login {
    use super::*;

    #[tokio::test]
    async fn test_register_login_me_roundtrip() {
        let app = TestApp::new();
        let fixture = app.register("alice@example.com", "alice").await.unwrap();

        let login = app
            .send(json_request(
                Method::POST,
                "/api/v1/auth/login",
                None,
                json!({ "email": "alice@example.com", "password": TEST_PASSWORD }),
            ))
            .await
            .unwrap();
        assert_eq!(login.status, StatusCode::OK);
        assert_eq!(login.body["user"]["id"], fixture.id);
        let token = login.body["token"].as_str().unwrap();

        let me = app
            .send(get_request("/api/v1/auth/me", Some(token)))
            .await
            .unwrap();
        assert_eq!(me.status, StatusCode::OK);
        assert_eq!(me.body["email"], "alice@example.com");
        assert_eq!(me.body["username"], "alice");
        assert!(me.body.get("password_hash").is_none());
    }

    #[tokio::test]
    async fn test_login_matches_email_case_insensitively() {
        let app = TestApp::new();
        app.register("Alice@Example.com", "alice").await.unwrap();

        let login = app
            .send(json_request(
                Method::POST,
                "/api/v1/auth/login",
                None,
                json!({ "email": "ALICE@example.COM", "password": TEST_PASSWORD }),
            ))
            .await
            .unwrap();
        assert_eq!(login.status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_duplicate_registration_conflicts() {
        let app = TestApp::new();
        app.register("alice@example.com", "alice").await.unwrap();

        let response = app
            .send(json_request(
                Method::POST,
                "/api/v1/auth/register",
                None,
                json!({ "email": "alice@example.com", "password": "another1", "username": "alice2" }),
            ))
            .await
            .unwrap();
        assertions::assert_error(&response, StatusCode::CONFLICT, "CONFLICT");
        assert_eq!(app.store.len(), 1);
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email_look_the_same() {
        let app = TestApp::new();
        app.register("alice@example.com", "alice").await.unwrap();

        let wrong_password = app
            .send(json_request(
                Method::POST,
                "/api/v1/auth/login",
                None,
                json!({ "email": "alice@example.com", "password": "not-the-password" }),
            ))
            .await
            .unwrap();
        let unknown_email = app
            .send(json_request(
                Method::POST,
                "/api/v1/auth/login",
                None,
                json!({ "email": "nobody@example.com", "password": TEST_PASSWORD }),
            ))
            .await
            .unwrap();

        assertions::assert_error(&wrong_password, StatusCode::UNAUTHORIZED, "AUTHENTICATION_ERROR");
        assert_eq!(wrong_password.body, unknown_email.body);
        assert_eq!(unknown_email.status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_register_validation_errors() {
        let app = TestApp::new();

        let response = app
            .send(json_request(
                Method::POST,
                "/api/v1/auth/register",
                None,
                json!({ "email": "not-an-email", "password": "secret1", "username": "alice" }),
            ))
            .await
            .unwrap();
        assertions::assert_error(&response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_register_rejects_blank_username() {
        let app = TestApp::new();

        let response = app
            .send(json_request(
                Method::POST,
                "/api/v1/auth/register",
                None,
                json!({ "email": "alice@example.com", "password": "secret1", "username": "   " }),
            ))
            .await
            .unwrap();
        assertions::assert_error(&response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
        assert!(app.store.is_empty());
    }
}

mod test_me {
    use super::*;

    #[tokio::test]
    async fn test_me_rejects_missing_and_garbage_tokens() {
        let app = TestApp::new();

        let missing = app.send(get_request("/api/v1/auth/me", None)).await.unwrap();
        let garbage = app
            .send(get_request("/api/v1/auth/me", Some("garbage")))
            .await
            .unwrap();

        assertions::assert_error(&missing, StatusCode::UNAUTHORIZED, "UNAUTHORIZED");
        assert_eq!(missing.body, garbage.body);
        assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_me_rejects_non_bearer_scheme() {
        let app = TestApp::new();
        let fixture = app.register("alice@example.com", "alice").await.unwrap();

        let request = Request::builder()
            .uri("/api/v1/auth/me")
            .header(header::AUTHORIZATION, format!("Token {}", fixture.token))
            .body(Body::empty())
            .unwrap();
        let response = app.send(request).await.unwrap();

        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_me_for_deleted_user_is_not_found() {
        let app = TestApp::new();
        let fixture = app.register("alice@example.com", "alice").await.unwrap();
        app.store.remove(fixture.id);

        let response = app
            .send(get_request("/api/v1/auth/me", Some(&fixture.token)))
            .await
            .unwrap();
        assertions::assert_error(&response, StatusCode::NOT_FOUND, "NOT_FOUND");
    }
}

mod test_refresh {
    use super::*;

    fn refresh_request(token: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/api/v1/auth/refresh")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_refresh_of_fresh_token_conflicts() {
        let app = TestApp::new();
        let fixture = app.register("alice@example.com", "alice").await.unwrap();

        let response = app.send(refresh_request(&fixture.token)).await.unwrap();
        assertions::assert_error(&response, StatusCode::CONFLICT, "CONFLICT");
    }

    #[tokio::test]
    async fn test_refresh_near_expiry_issues_usable_token() {
        // One hour of lifetime is inside the one-day refresh threshold
        let app = TestApp::with_config(TestConfig {
            jwt_ttl_secs: 3600,
            ..TestConfig::default()
        });
        let fixture = app.register("alice@example.com", "alice").await.unwrap();

        let response = app.send(refresh_request(&fixture.token)).await.unwrap();
        assert_eq!(response.status, StatusCode::OK);
        let token = response.body["token"].as_str().unwrap();
        assert_ne!(token, fixture.token);

        let me = app
            .send(get_request("/api/v1/auth/me", Some(token)))
            .await
            .unwrap();
        assert_eq!(me.status, StatusCode::OK);
        assert_eq!(me.body["id"], fixture.id);
    }

    #[tokio::test]
    async fn test_refresh_rejects_forged_token() {
        let app = TestApp::new();

        let response = app.send(refresh_request("a.b.c")).await.unwrap();
        assertions::assert_error(&response, StatusCode::UNAUTHORIZED, "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_refresh_failures_share_one_body() {
        let app = TestApp::new();
        let fixture = app.register("alice@example.com", "alice").await.unwrap();

        let with_header = |value: Option<String>| {
            let mut builder = Request::builder()
                .method(Method::POST)
                .uri("/api/v1/auth/refresh");
            if let Some(value) = value {
                builder = builder.header(header::AUTHORIZATION, value);
            }
            builder.body(Body::empty()).unwrap()
        };

        let missing = app.send(with_header(None)).await.unwrap();
        let wrong_scheme = app
            .send(with_header(Some(format!("Token {}", fixture.token))))
            .await
            .unwrap();
        let garbage = app
            .send(with_header(Some("Bearer garbage".to_string())))
            .await
            .unwrap();

        assertions::assert_error(&missing, StatusCode::UNAUTHORIZED, "UNAUTHORIZED");
        for response in [&wrong_scheme, &garbage] {
            assert_eq!(response.status, StatusCode::UNAUTHORIZED);
            assert_eq!(response.body, missing.body);
        }

        // Same body the gate gives on a protected route
        let me = app.send(get_request("/api/v1/auth/me", None)).await.unwrap();
        assert_eq!(me.body, missing.body);
    }

    #[tokio::test]
    async fn test_refresh_requires_header() {
        let app = TestApp::new();

        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/auth/refresh")
            .body(Body::empty())
            .unwrap();
        let response = app.send(request).await.unwrap();
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    }
}
