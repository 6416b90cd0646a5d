use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use sqlx::SqlitePool;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tower_sessions::{MemoryStore, SessionManagerLayer};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use crate::api::{admin, auth, pages};
use crate::config::Config;
use crate::db;
use crate::error::AppError;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
}

/// Builds the full application router over an already-initialized pool.
/// Split out from `start_server` so tests can drive it in-process.
pub fn build_app(pool: SqlitePool) -> Router {
    let state = Arc::new(AppState { db: pool });

    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store).with_secure(false);

    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/", get(pages::index))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/feedback", get(pages::feedback_page).post(pages::feedback_submit))
        .route("/admin", get(admin::admin_page))
        .route("/menu/add", post(admin::menu_add))
        .route("/menu/update/{id}", post(admin::menu_update))
        .route("/menu/delete/{id}", post(admin::menu_delete))
        .route("/feedback/delete/{id}", post(admin::feedback_delete))
        .layer(session_layer)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_server(config: Config) -> Result<(), AppError> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("initializing database at {}", config.db_url);
    let pool = db::init(&config).await?;

    let app = build_app(pool);

    let address = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&address)
        .await
        .unwrap_or_else(|e| panic!("Failed to bind to {address}: {e}"));
    info!("server running on http://{address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server failed");

    info!("server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
        info!("received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
        info!("received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
