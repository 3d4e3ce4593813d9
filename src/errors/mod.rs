//! Error handling module for the admin client.
//!
//! Provides one crate-wide error type covering the failure taxonomy: transport
//! failures, non-success API statuses, session problems, and local failures
//! (decoding, configuration, session file I/O).

use serde::{Deserialize, Serialize};

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const TRANSPORT_ERROR: &str = "TRANSPORT_ERROR";
    pub const API_ERROR: &str = "API_ERROR";
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const MISSING_TOKEN: &str = "MISSING_TOKEN";
    pub const ACTION_IN_FLIGHT: &str = "ACTION_IN_FLIGHT";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const DECODE_ERROR: &str = "DECODE_ERROR";
    pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
    pub const IO_ERROR: &str = "IO_ERROR";
}

/// Application error type.
#[derive(Debug, Clone)]
pub enum AppError {
    /// Network or transport-level failure (DNS, connect, timeout)
    Transport(String),
    /// Non-success status from the API, with the server's message
    Api { status: u16, message: String },
    /// The API rejected the session token
    Unauthorized(String),
    /// An authenticated call was attempted with no session token present
    MissingToken,
    /// A mutation for the same record is already outstanding
    ActionInFlight { action: String, target: String },
    /// Client-side validation failure (required form fields etc.)
    Validation(String),
    /// Response body could not be decoded
    Decode(String),
    /// Missing or malformed configuration
    Config(String),
    /// Session file I/O failure
    Io(String),
}

impl AppError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Transport(_) => codes::TRANSPORT_ERROR,
            AppError::Api { .. } => codes::API_ERROR,
            AppError::Unauthorized(_) => codes::UNAUTHORIZED,
            AppError::MissingToken => codes::MISSING_TOKEN,
            AppError::ActionInFlight { .. } => codes::ACTION_IN_FLIGHT,
            AppError::Validation(_) => codes::VALIDATION_ERROR,
            AppError::Decode(_) => codes::DECODE_ERROR,
            AppError::Config(_) => codes::CONFIG_ERROR,
            AppError::Io(_) => codes::IO_ERROR,
        }
    }

    /// Get the user-facing error message.
    pub fn message(&self) -> String {
        match self {
            AppError::Transport(msg) => msg.clone(),
            AppError::Api { status, message } => format!("API error {}: {}", status, message),
            AppError::Unauthorized(msg) => msg.clone(),
            AppError::MissingToken => "No session token. Please log in.".to_string(),
            AppError::ActionInFlight { action, target } => {
                format!("{} already in progress for {}", action, target)
            }
            AppError::Validation(msg) => msg.clone(),
            AppError::Decode(msg) => msg.clone(),
            AppError::Config(msg) => msg.clone(),
            AppError::Io(msg) => msg.clone(),
        }
    }

    /// Whether the session should be treated as ended (redirect to login).
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, AppError::Unauthorized(_) | AppError::MissingToken)
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for AppError {}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            tracing::error!("Response decode error: {:?}", err);
            AppError::Decode(format!("Response decode error: {}", err))
        } else {
            tracing::error!("Transport error: {:?}", err);
            AppError::Transport(format!("Request failed: {}", err))
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON error: {:?}", err);
        AppError::Decode(format!("JSON error: {}", err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        tracing::error!("I/O error: {:?}", err);
        AppError::Io(format!("I/O error: {}", err))
    }
}

/// Error payload the marketplace API returns on non-2xx responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
