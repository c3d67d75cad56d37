use std::net::SocketAddr;
use std::sync::Arc;

use assetboard_core::gateway::{DataSource, Unconfigured};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use assetboard_api::chat::ChatClient;
use assetboard_api::config::ServerConfig;
use assetboard_api::router::build_app_router;
use assetboard_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    "assetboard_api=debug,assetboard_core=debug,tower_http=debug".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Data source ---
    let (data, configured): (Arc<dyn DataSource>, bool) = match config.database_url.as_deref() {
        Some(database_url) => {
            let pool = assetboard_db::create_pool(database_url)
                .await
                .expect("Failed to connect to database");
            tracing::info!("Database connection pool created");

            assetboard_db::health_check(&pool)
                .await
                .expect("Database health check failed");
            tracing::info!("Database health check passed");

            assetboard_db::run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("Database migrations applied");

            let data: Arc<dyn DataSource> = Arc::new(assetboard_db::PgGateway::new(pool));
            (data, true)
        }
        None => {
            tracing::warn!("DATABASE_URL is not set; serving in not-configured mode");
            let data: Arc<dyn DataSource> = Arc::new(Unconfigured);
            (data, false)
        }
    };

    // --- Chat ---
    let chat = ChatClient::from_config(&config.chat)
        .expect("Invalid chat configuration")
        .map(Arc::new);
    if chat.is_none() {
        tracing::info!("CHAT_API_KEY is not set; assistant disabled");
    }

    // --- App state ---
    let state = AppState {
        data,
        configured,
        config: Arc::new(config.clone()),
        chat,
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
