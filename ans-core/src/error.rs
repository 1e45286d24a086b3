//! Error types for the ANS client

use thiserror::Error;

/// Core error type for ANS API and CLI operations
#[derive(Error, Debug)]
pub enum AnsError {
    /// A command-line flag value could not be parsed
    #[error("Invalid value for flag --{flag}: {reason}")]
    InvalidFlagValue { flag: String, reason: String },

    /// A requested output column does not exist on the rendered records
    #[error("Invalid column: {0}")]
    InvalidColumn(String),

    /// The API answered with a non-success status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The requested resource does not exist
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Transport-level failure talking to the API
    #[error("HTTP error: {0}")]
    Http(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for ANS operations
pub type Result<T> = std::result::Result<T, AnsError>;

impl AnsError {
    /// Shorthand for [`AnsError::InvalidFlagValue`].
    pub fn invalid_flag(flag: impl Into<String>, reason: impl Into<String>) -> Self {
        AnsError::InvalidFlagValue {
            flag: flag.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for AnsError {
    fn from(err: serde_json::Error) -> Self {
        AnsError::Serialization(err.to_string())
    }
}
