use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Everything that can stop a refinement from reaching the preview pane.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RefineError {
    #[error("Mohon masukkan API Key Anda terlebih dahulu.")]
    MissingApiKey,

    #[error("Mohon masukkan catatan yang ingin dirapikan.")]
    EmptyNotes,

    #[error("API Key yang Anda masukkan tidak valid. Mohon periksa kembali.")]
    InvalidApiKey,

    /// Carries the provider's raw error text.
    #[error("Terjadi kesalahan saat menghubungi AI: {0}")]
    Remote(String),

    #[error("AI masih memproses catatan sebelumnya. Mohon tunggu sebentar.")]
    Busy,

    #[error("Sesi tidak ditemukan. Muat ulang halaman untuk memulai sesi baru.")]
    SessionNotFound,

    #[error("Belum ada catatan rapi untuk diunduh.")]
    NoResult,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
    pub severity: Severity,
}

impl RefineError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingApiKey => "MISSING_API_KEY",
            Self::EmptyNotes => "EMPTY_NOTES",
            Self::InvalidApiKey => "INVALID_API_KEY",
            Self::Remote(_) => "REMOTE_ERROR",
            Self::Busy => "BUSY",
            Self::SessionNotFound => "SESSION_NOT_FOUND",
            Self::NoResult => "NO_RESULT",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::EmptyNotes | Self::Busy => Severity::Warning,
            _ => Severity::Error,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingApiKey | Self::EmptyNotes => StatusCode::BAD_REQUEST,
            Self::InvalidApiKey => StatusCode::UNAUTHORIZED,
            Self::Remote(_) => StatusCode::BAD_GATEWAY,
            Self::Busy => StatusCode::CONFLICT,
            Self::SessionNotFound | Self::NoResult => StatusCode::NOT_FOUND,
        }
    }

    /// True when the service was reached, i.e. the session went through `Waiting`.
    pub fn is_generation_failure(&self) -> bool {
        matches!(self, Self::InvalidApiKey | Self::Remote(_))
    }
}

impl IntoResponse for RefineError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.to_string(),
            code: self.code(),
            severity: self.severity(),
        };
        (self.status(), Json(body)).into_response()
    }
}
