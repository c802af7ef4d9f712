use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HubError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Session expired. Run 'taskhub login' to sign in again")]
    AuthExpired,

    #[error("Not signed in. Run 'taskhub login' first")]
    NotSignedIn,

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Failed to read config file at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    #[error("Stored session is corrupt: {0}")]
    SessionParse(#[source] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HubError>;
