//! Studyhall application composition root
//!
//! Composes the domain routers and the shared middleware stack into a single
//! application.

use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    middleware::from_fn_with_state,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use sqlx::{postgres::PgPoolOptions, PgPool};
use studyhall_auth::{AuthConfig, TokenCodec};
use studyhall_common::{Config, Error};
use studyhall_ratelimit::{rate_limit, RateLimiter};
use studyhall_users::{PgUserStore, UserStore, UsersState};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

/// How often expired rate limit windows are evicted
pub const SWEEP_PERIOD: Duration = Duration::from_secs(60);

/// Everything the router needs, built once at startup
#[derive(Clone)]
pub struct AppComponents {
    pub users: UsersState,
    pub limiter: RateLimiter,
}

impl AppComponents {
    pub fn new(config: &Config, users: Arc<dyn UserStore>) -> Self {
        let codec = TokenCodec::new(AuthConfig::from(config));
        let limiter = RateLimiter::new(
            Duration::from_secs(config.rate_limit_window_secs),
            config.rate_limit_max_requests,
        );

        Self {
            users: UsersState::new(users, codec),
            limiter,
        }
    }
}

/// Connect to PostgreSQL and apply pending migrations
pub async fn connect_database(config: &Config) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .map_err(|e| anyhow::anyhow!("Database connection failed: {}", e))?;

    sqlx::migrate!("../../migrations")
        .run(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Database migration failed: {}", e))?;

    Ok(pool)
}

/// Build components backed by the PostgreSQL user store
pub fn postgres_components(config: &Config, pool: PgPool) -> AppComponents {
    AppComponents::new(config, Arc::new(PgUserStore::new(pool)))
}

/// Create the main application router with all routes and middleware
///
/// Requests pass through request-id assignment, tracing, panic recovery,
/// CORS and the rate limiter, in that order, before reaching a handler.
pub fn create_router(components: AppComponents) -> Router {
    let AppComponents { users, limiter } = components;

    let api = studyhall_users::routes(&users).with_state(users);

    let router = Router::new()
        .route("/health", get(health_check))
        .route("/", get(|| async { "Studyhall API v0.0.1-SNAPSHOT" }))
        .nest("/api", api);

    with_middleware(router, limiter)
}

fn with_middleware(router: Router, limiter: RateLimiter) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(CatchPanicLayer::custom(panic_response))
            .layer(CorsLayer::permissive())
            .layer(from_fn_with_state(limiter, rate_limit))
            .into_inner(),
    )
}

/// Render a handler panic as a 500 with the standard error body
fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };

    Error::Internal(format!("Handler panicked: {}", detail)).into_response()
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
