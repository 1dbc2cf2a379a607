//! Error types and handling for `DiveTrip`

use thiserror::Error;

/// Main error type for the `DiveTrip` application
#[derive(Error, Debug)]
pub enum DiveTripError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Payload could not be judged
    #[error("Parse error: {source}")]
    Parse {
        #[from]
        source: ParseError,
    },

    /// Planning agent failures
    #[error("Agent error: {message}")]
    Agent { message: String },

    /// Trip request that cannot be normalised
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

/// Reasons a check could not reach a verdict.
///
/// A parse error means "cannot judge", never "judged invalid".
#[derive(Error, Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ParseError {
    #[error("payload is not valid JSON: {0}")]
    Json(String),

    #[error("field `{path}` is not a valid ISO-8601 date: {value:?}")]
    InvalidDate { path: String, value: String },

    #[error("field `{0}` is missing")]
    MissingField(String),

    #[error("field `{path}` has unexpected shape, expected {expected}")]
    UnexpectedShape { path: String, expected: String },
}

impl DiveTripError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new agent error
    pub fn agent<S: Into<String>>(message: S) -> Self {
        Self::Agent {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            DiveTripError::Config { .. } => {
                "Configuration error. Please check your config file and environment.".to_string()
            }
            DiveTripError::Parse { source } => {
                format!("The trip payload could not be read: {source}")
            }
            DiveTripError::Agent { .. } => {
                "The planning agent did not produce an answer.".to_string()
            }
            DiveTripError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            DiveTripError::Io { .. } => {
                "File operation failed. Please check the path and permissions.".to_string()
            }
        }
    }
}
