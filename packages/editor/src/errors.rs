//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Path error: {0}")]
    Path(#[from] PathError),
}

/// Rejections raised by strict path parsing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("Empty segment at position {position} in path '{path}'")]
    EmptySegment { path: String, position: usize },
}

pub type EditorResult<T> = Result<T, EditorError>;
