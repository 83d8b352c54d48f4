pub mod ai;
pub mod config;
pub mod error;
pub mod session;
pub mod web;

use anyhow::Context;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::AppConfig;
use crate::web::{create_router, AppState};

pub async fn run() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let app_config = AppConfig::load(&AppConfig::config_dir());
    if app_config.gemini_api_key.trim().is_empty() {
        log::info!(
            "No {} configured; the page will ask for a key",
            config::API_KEY_ENV
        );
    }

    let addr = format!("{}:{}", app_config.host, app_config.port);
    let session_ttl = app_config.session_ttl();
    let state = Arc::new(AppState::new(app_config));
    tokio::spawn(session::manager::run_eviction(
        state.sessions.clone(),
        session_ttl,
    ));
    let router = create_router(state);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    log::info!("AI Note Refiner listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    log::info!("AI Note Refiner stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                log::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => log::info!("Received Ctrl+C, shutting down"),
        () = terminate => log::info!("Received terminate signal, shutting down"),
    }
}
