//! Core error types for taskmon-core.
//!
//! Errors here are the ones a caller can act on. "Not found" lookups in the
//! species catalog are modelled as `Option` and never surface as errors.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for taskmon-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Local storage errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Remote document store errors
    #[error("Remote store error: {0}")]
    Remote(#[from] RemoteError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Local key-value storage errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown dot-path key
    #[error("unknown config key: {0}")]
    UnknownKey(String),
}

/// Remote document store errors.
#[derive(Error, Debug)]
pub enum RemoteError {
    /// No `[remote]` section or no user id configured
    #[error("Remote store is not configured")]
    NotConfigured,

    /// Transport-level failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with an unexpected status
    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    /// Base URL could not be joined with the document path
    #[error("Invalid remote URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Validation errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Study phase must be at least one minute long
    #[error("Invalid session config: study minutes must be greater than zero")]
    NonPositiveStudyDuration,

    /// A phase is already running or awaiting resolution
    #[error("A session is already active ({0})")]
    SessionActive(String),

    /// Name is not one of the starter species
    #[error("'{0}' is not a starter species")]
    NotAStarter(String),

    /// Starter selection happens only once
    #[error("Profile is already complete")]
    ProfileAlreadyComplete,

    /// Operation requires a completed profile
    #[error("Profile is not complete; choose a starter first")]
    ProfileIncomplete,

    /// Unknown session type tag
    #[error("Unknown session type: {0}")]
    UnknownSessionType(String),

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    StorageError::Locked
                } else {
                    StorageError::QueryFailed(err.to_string())
                }
            }
            _ => StorageError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Storage(err.into())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
