use chrono::Local;
use std::sync::Arc;

use super::gemini::GeminiClient;
use super::prompt::build_refine_prompt;
use super::RefinedNote;
use crate::error::RefineError;
use crate::session::manager::{SessionSnapshot, SessionState};

/// Rejects a submit before anything reaches the service. The credential is
/// checked first, then the notes. Only zero-length notes count as empty;
/// whitespace is sent as typed.
pub fn validate_submission(api_key: Option<&str>, raw_notes: &str) -> Result<(), RefineError> {
    if api_key.map_or(true, |k| k.trim().is_empty()) {
        return Err(RefineError::MissingApiKey);
    }
    if raw_notes.is_empty() {
        return Err(RefineError::EmptyNotes);
    }
    Ok(())
}

/// Turns raw notes into a refined document with exactly one model call.
pub async fn generate_refined_note(
    client: &GeminiClient,
    api_key: &str,
    raw_notes: &str,
) -> Result<RefinedNote, RefineError> {
    let prompt = build_refine_prompt(raw_notes);
    let content = client.generate(api_key, &prompt).await?;

    Ok(RefinedNote {
        content,
        model: client.model().to_string(),
        generated_at: Local::now(),
    })
}

/// Full submit flow for one session: validate, mark `Waiting`, call the
/// model, store the outcome. The call runs on its own task: the session leaves
/// `Waiting` even if this future is dropped mid-call.
pub async fn refine_notes(
    client: &GeminiClient,
    sessions: &SessionState,
    session_id: &str,
    api_key: Option<&str>,
    raw_notes: &str,
) -> Result<SessionSnapshot, RefineError> {
    if sessions.lock().get(session_id).is_none() {
        return Err(RefineError::SessionNotFound);
    }

    if let Err(e) = validate_submission(api_key, raw_notes) {
        log::warn!("Submit rejected for session {}: {}", session_id, e.code());
        return Err(e);
    }
    let api_key = api_key.unwrap_or_default().trim().to_string();

    sessions.lock().begin_generation(session_id)?;
    log::info!(
        "Refining {} chars of notes for session {} with {}",
        raw_notes.chars().count(),
        session_id,
        client.model()
    );

    let task = tokio::spawn(run_generation(
        client.clone(),
        Arc::clone(sessions),
        session_id.to_string(),
        api_key,
        raw_notes.to_string(),
    ));

    match task.await {
        Ok((outcome, snapshot)) => {
            let snapshot = snapshot?;
            outcome.map(|_| snapshot)
        }
        Err(e) => {
            let err = RefineError::Remote(format!("Generation task failed: {}", e));
            log::error!("Generation task for session {} died: {}", session_id, e);
            sessions.lock().complete_generation(session_id, &Err(err.clone())).ok();
            Err(err)
        }
    }
}

async fn run_generation(
    client: GeminiClient,
    sessions: SessionState,
    session_id: String,
    api_key: String,
    raw_notes: String,
) -> (
    Result<RefinedNote, RefineError>,
    Result<SessionSnapshot, RefineError>,
) {
    let outcome = generate_refined_note(&client, &api_key, &raw_notes).await;

    match &outcome {
        Ok(note) => log::info!(
            "Session {} received {} chars of refined notes",
            session_id,
            note.content.chars().count()
        ),
        Err(e) => log::error!("Generation failed for session {}: {}", session_id, e),
    }

    let snapshot = sessions.lock().complete_generation(&session_id, &outcome);
    (outcome, snapshot)
}
