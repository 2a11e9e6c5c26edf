// ABOUTME: Main entry point for the daybook webapp, a password-gated multi-profile diary
// ABOUTME: Sets up config, storage, routes, and the web server

use std::sync::Arc;

use axum::{
    response::Html,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

mod config;
mod diary;
mod entities;
mod error;
mod migration;
mod password;
mod profiles;
mod storage;
mod types;

#[cfg(test)]
mod storage_tests;

use config::Config;
use storage::Storage;

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<Storage>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "daybook=info".into()),
        )
        .init();

    let config = Config::from_env();
    let storage = Arc::new(Storage::connect(&config.database_url).await?);

    let app = router(AppState { storage });

    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

// Unlisted methods on these routes get a 405 with an Allow header from axum.
fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route(
            "/profiles",
            get(profiles::list_profiles)
                .post(profiles::create_profile)
                .delete(profiles::delete_profile),
        )
        .route(
            "/diary/:profile",
            get(diary::list_entries)
                .post(diary::create_entry)
                .put(diary::update_entry)
                .delete(diary::delete_entry),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", err);
    }
}
