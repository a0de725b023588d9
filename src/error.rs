//! Error types for the APP LEGAL CLI

use std::time::Duration;
use thiserror::Error;

/// Result type alias for applegal operations
pub type Result<T> = std::result::Result<T, Error>;

/// Message carried by every 401 so callers can match on a single sentinel.
pub const UNAUTHORIZED_SENTINEL: &str = "UNAUTHORIZED_401";

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Action(#[from] ActionError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether this error means the session is no longer valid.
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            Error::Api(ApiError::Unauthorized) | Error::Api(ApiError::MissingToken)
        )
    }
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

/// API-related errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{sentinel}", sentinel = UNAUTHORIZED_SENTINEL)]
    Unauthorized,

    #[error("No session token. Run `applegal login` to sign in.")]
    MissingToken,

    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("Could not connect to {host}: {message}")]
    Network { host: String, message: String },

    #[error("Request to {host} timed out after {after:?}")]
    Timeout { host: String, after: Duration },

    #[error("Invalid response (HTTP {status}): {body}")]
    InvalidResponse { status: u16, body: String },
}

impl ApiError {
    /// Build a network error from a reqwest failure against `host`.
    pub fn network(host: &str, err: reqwest::Error) -> Self {
        let message = if err.is_connect() {
            "connection refused".to_string()
        } else {
            err.to_string()
        };
        ApiError::Network {
            host: host.to_string(),
            message,
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),

    #[error("Client id not configured. Run `applegal config set-client <ID>` first.")]
    MissingClientId,
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Token persistence errors. Never fatal to a login.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Session storage unavailable: {0}")]
    Unavailable(String),

    #[error("Session file is corrupt: {0}")]
    Corrupt(String),
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Unavailable(err.to_string())
    }
}

/// A mutating operation failed; local state was left untouched.
#[derive(Debug, Error)]
#[error("Could not {action}: {message}")]
pub struct ActionError {
    pub action: String,
    pub message: String,
}

impl ActionError {
    pub fn new(action: impl Into<String>, source: &dyn std::fmt::Display) -> Self {
        Self {
            action: action.into(),
            message: source.to_string(),
        }
    }
}
