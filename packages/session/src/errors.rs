//! Error types for the editor session

use crate::controller::EditorState;
use payload_editor::EditorError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Editor error: {0}")]
    Editor(#[from] EditorError),

    #[error("Validation error: {summary}")]
    Validation { summary: String },

    #[error("API call failed: {0}")]
    Transport(#[from] TransportError),

    #[error("A submission is already in progress")]
    SubmitInProgress,

    #[error("Cannot submit while {0:?}")]
    NotSubmittable(EditorState),

    #[error("Editor is closed")]
    Closed,

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("Server responded {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Request timed out")]
    Timeout,
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportError::Timeout
        } else {
            TransportError::Request(e.to_string())
        }
    }
}

pub type SessionResult<T> = Result<T, SessionError>;
