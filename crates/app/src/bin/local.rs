// Studyhall API - Server

use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use studyhall_common::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        e
    })?;

    init_tracing(&config)?;

    info!("Starting Studyhall API server");
    info!(config = ?config, "Configuration loaded successfully");

    let pool = studyhall_app::connect_database(&config).await.map_err(|e| {
        error!("Failed to prepare database: {}", e);
        e
    })?;

    info!("Database connection established, migrations applied");

    let components = studyhall_app::postgres_components(&config, pool);
    let sweeper = components
        .limiter
        .spawn_sweeper(studyhall_app::SWEEP_PERIOD);

    let app = studyhall_app::create_router(components);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    let addr = listener.local_addr()?;

    info!("Server listening on http://{}", addr);
    info!("Health check available at http://{}/health", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    sweeper.shutdown().await;

    info!("Server shutdown complete");
    Ok(())
}

fn init_tracing(config: &Config) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(&config.rust_log)
        .map_err(|e| anyhow::anyhow!("Invalid RUST_LOG filter: {}", e))?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = if config.log_format.eq_ignore_ascii_case("json") {
        builder.json().try_init()
    } else {
        builder.pretty().try_init()
    };

    result.map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received terminate signal, starting graceful shutdown");
        },
    }
}
