//! HTTP surface: the two-pane page and the JSON API behind it.

pub mod handlers;
pub mod page;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::ai::gemini::GeminiClient;
use crate::config::AppConfig;
use crate::session::manager::{SessionManager, SessionState};

pub struct AppState {
    pub config: AppConfig,
    pub client: GeminiClient,
    pub sessions: SessionState,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let client = GeminiClient::from_config(&config);
        Self {
            config,
            client,
            sessions: SessionManager::shared(),
        }
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/config", get(handlers::get_config))
        .route("/sessions", post(handlers::create_session))
        .route(
            "/sessions/{id}",
            get(handlers::get_session).delete(handlers::end_session),
        )
        .route("/sessions/{id}/refine", post(handlers::refine))
        .route("/sessions/{id}/download", get(handlers::download));

    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .nest("/api", api)
        .with_state(state)
}
