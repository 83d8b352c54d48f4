use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use super::export::download_file_name;
use crate::ai::RefinedNote;
use crate::error::RefineError;

pub type SessionState = Arc<Mutex<SessionManager>>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub status: SessionStatus,
    /// Bumped on every read or submit; idle sessions are evicted by it.
    pub last_active: DateTime<Utc>,
    pub refined: Option<RefinedNote>,
    pub last_error: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum SessionStatus {
    Idle,
    Waiting,
    Ready,
    Failed,
}

/// What the page polls and renders.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionSnapshot {
    pub id: String,
    pub status: SessionStatus,
    pub refined: Option<RefinedNote>,
    pub last_error: Option<String>,
    pub download_file_name: Option<String>,
}

impl From<&Session> for SessionSnapshot {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id.clone(),
            status: session.status,
            refined: session.refined.clone(),
            last_error: session.last_error.clone(),
            download_file_name: session
                .refined
                .as_ref()
                .map(|note| download_file_name(&note.generated_at)),
        }
    }
}

/// Per-browser-tab state. Nothing here outlives the process.
#[derive(Default)]
pub struct SessionManager {
    sessions: HashMap<String, Session>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SessionState {
        Arc::new(Mutex::new(Self::new()))
    }

    pub fn create_session(&mut self) -> Session {
        let session = Session {
            id: uuid::Uuid::new_v4().to_string(),
            status: SessionStatus::Idle,
            last_active: Utc::now(),
            refined: None,
            last_error: None,
        };
        self.sessions.insert(session.id.clone(), session.clone());
        session
    }

    pub fn get(&self, id: &str) -> Option<&Session> {
        self.sessions.get(id)
    }

    pub fn snapshot(&mut self, id: &str) -> Result<SessionSnapshot, RefineError> {
        let session = self
            .sessions
            .get_mut(id)
            .ok_or(RefineError::SessionNotFound)?;
        session.last_active = Utc::now();
        Ok(SessionSnapshot::from(&*session))
    }

    pub fn end_session(&mut self, id: &str) -> Result<Session, RefineError> {
        self.sessions.remove(id).ok_or(RefineError::SessionNotFound)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Moves the session into `Waiting`. Only one generation per session at a time.
    pub fn begin_generation(&mut self, id: &str) -> Result<(), RefineError> {
        let session = self
            .sessions
            .get_mut(id)
            .ok_or(RefineError::SessionNotFound)?;

        if session.status == SessionStatus::Waiting {
            return Err(RefineError::Busy);
        }

        session.status = SessionStatus::Waiting;
        session.last_error = None;
        session.last_active = Utc::now();
        Ok(())
    }

    /// Records the outcome of the call started by `begin_generation`.
    /// A success overwrites the previous result; a failure leaves it unset.
    pub fn complete_generation(
        &mut self,
        id: &str,
        outcome: &Result<RefinedNote, RefineError>,
    ) -> Result<SessionSnapshot, RefineError> {
        let session = self
            .sessions
            .get_mut(id)
            .ok_or(RefineError::SessionNotFound)?;

        session.last_active = Utc::now();
        match outcome {
            Ok(note) => {
                session.status = SessionStatus::Ready;
                session.refined = Some(note.clone());
                session.last_error = None;
            }
            Err(e) => {
                session.status = SessionStatus::Failed;
                session.refined = None;
                session.last_error = Some(e.to_string());
            }
        }

        Ok(SessionSnapshot::from(&*session))
    }

    /// Drops sessions untouched for longer than `max_idle`. A session that is
    /// still `Waiting` stays until its generation completes.
    pub fn evict_idle(&mut self, now: DateTime<Utc>, max_idle: chrono::Duration) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, session| {
            session.status == SessionStatus::Waiting || now - session.last_active <= max_idle
        });
        before - self.sessions.len()
    }

    pub fn refined(&self, id: &str) -> Result<RefinedNote, RefineError> {
        self.get(id)
            .ok_or(RefineError::SessionNotFound)?
            .refined
            .clone()
            .ok_or(RefineError::NoResult)
    }
}

/// Periodically evicts sessions the page abandoned without ending them.
pub async fn run_eviction(sessions: SessionState, max_idle: Duration) {
    let Ok(max_idle_chrono) = chrono::Duration::from_std(max_idle) else {
        log::warn!("Session TTL {:?} out of range, eviction disabled", max_idle);
        return;
    };
    let period = (max_idle / 4).max(Duration::from_secs(1));
    let mut interval = tokio::time::interval(period);

    loop {
        interval.tick().await;
        let evicted = sessions.lock().evict_idle(Utc::now(), max_idle_chrono);
        if evicted > 0 {
            log::info!("Evicted {} idle session(s)", evicted);
        }
    }
}
