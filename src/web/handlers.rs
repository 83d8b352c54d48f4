use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{page, AppState};
use crate::ai::llm::refine_notes;
use crate::config::PublicConfig;
use crate::error::RefineError;
use crate::session::export::{
    content_disposition, download_bytes, download_file_name, DOWNLOAD_CONTENT_TYPE,
};
use crate::session::manager::SessionSnapshot;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefineRequest {
    pub notes: String,
    /// Typed into the page when the server has no key of its own.
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub sessions: usize,
}

pub async fn index() -> Html<&'static str> {
    Html(page::INDEX_HTML)
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let sessions = state.sessions.lock().len();
    Json(HealthResponse {
        status: "ok",
        sessions,
    })
}

pub async fn get_config(State(state): State<Arc<AppState>>) -> Json<PublicConfig> {
    Json(state.config.public())
}

pub async fn create_session(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<SessionSnapshot>) {
    let session = state.sessions.lock().create_session();
    log::debug!("Session {} created", session.id);
    (StatusCode::CREATED, Json(SessionSnapshot::from(&session)))
}

pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SessionSnapshot>, RefineError> {
    let snapshot = state.sessions.lock().snapshot(&id);
    snapshot.map(Json)
}

pub async fn end_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, RefineError> {
    state.sessions.lock().end_session(&id)?;
    log::debug!("Session {} ended", id);
    Ok(StatusCode::NO_CONTENT)
}

pub async fn refine(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<RefineRequest>,
) -> Result<Json<SessionSnapshot>, RefineError> {
    let api_key = state.config.resolve_api_key(request.api_key.as_deref());
    refine_notes(
        &state.client,
        &state.sessions,
        &id,
        api_key.as_deref(),
        &request.notes,
    )
    .await
    .map(Json)
}

pub async fn download(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, RefineError> {
    let note = state.sessions.lock().refined(&id)?;
    let file_name = download_file_name(&note.generated_at);

    Ok((
        [
            (header::CONTENT_TYPE, DOWNLOAD_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, content_disposition(&file_name)),
        ],
        download_bytes(&note),
    ))
}
