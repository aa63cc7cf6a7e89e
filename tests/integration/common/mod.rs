//! Common test utilities and fixtures for integration tests

use std::sync::Arc;

use anyhow::Result;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use studyhall_app::{create_router, AppComponents};
use studyhall_common::Config;
use studyhall_users::InMemoryUserStore;
use tower::ServiceExt;

pub const TEST_PASSWORD: &str = "correct-horse";

/// Test environment configuration
pub struct TestConfig {
    pub jwt_ttl_secs: i64,
    pub rate_limit_max_requests: u32,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            jwt_ttl_secs: studyhall_common::config::DEFAULT_JWT_TTL_SECS,
            rate_limit_max_requests: 1000,
        }
    }
}

impl TestConfig {
    fn into_config(self) -> Config {
        let ttl = self.jwt_ttl_secs.to_string();
        let max = self.rate_limit_max_requests.to_string();
        Config::from_lookup(move |key| match key {
            "DATABASE_URL" => Some("postgres://localhost/studyhall_test".to_string()),
            "JWT_SECRET" => Some("test_secret_key_for_testing_only".to_string()),
            "JWT_TTL_SECS" => Some(ttl.clone()),
            "RATE_LIMIT_MAX_REQUESTS" => Some(max.clone()),
            _ => None,
        })
        .expect("test config should parse")
    }
}

/// Test application: the composed router plus direct store access
pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryUserStore>,
}

/// Response status with its JSON body (`Null` when the body is not JSON)
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// A registered user and the session token issued at registration
pub struct UserFixture {
    pub id: i64,
    pub email: String,
    pub token: String,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(TestConfig::default())
    }

    pub fn with_config(config: TestConfig) -> Self {
        let config = config.into_config();
        let store = Arc::new(InMemoryUserStore::new());
        let router = create_router(AppComponents::new(&config, store.clone()));

        Self { router, store }
    }

    pub async fn send(&self, request: Request<Body>) -> Result<TestResponse> {
        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        Ok(TestResponse { status, body })
    }

    pub async fn register(&self, email: &str, username: &str) -> Result<UserFixture> {
        let response = self
            .send(json_request(
                Method::POST,
                "/api/v1/auth/register",
                None,
                json!({ "email": email, "password": TEST_PASSWORD, "username": username }),
            ))
            .await?;
        anyhow::ensure!(
            response.status == StatusCode::CREATED,
            "registration failed with {}: {}",
            response.status,
            response.body
        );

        Ok(UserFixture {
            id: response.body["user"]["id"]
                .as_i64()
                .ok_or_else(|| anyhow::anyhow!("missing user id"))?,
            email: email.to_string(),
            token: response.body["token"]
                .as_str()
                .ok_or_else(|| anyhow::anyhow!("missing token"))?
                .to_string(),
        })
    }
}

pub fn json_request(method: Method, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

pub mod assertions {
    use super::TestResponse;
    use axum::http::StatusCode;

    pub fn assert_error(response: &TestResponse, status: StatusCode, code: &str) {
        assert_eq!(response.status, status, "body: {}", response.body);
        assert_eq!(response.body["error"]["code"], code, "body: {}", response.body);
    }
}
