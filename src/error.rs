/// Error types for Tab Sessions
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SessionError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(i64),

    #[error("Session name cannot be empty")]
    EmptyName,

    #[error("Another operation is still in progress")]
    Busy,

    #[error("Sessions have not been loaded from storage")]
    NotLoaded,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Tab error: {0}")]
    Tabs(String),

    #[error("JSON error: {0}")]
    Json(String),
}

impl From<serde_json::Error> for SessionError {
    fn from(err: serde_json::Error) -> Self {
        SessionError::Json(err.to_string())
    }
}
