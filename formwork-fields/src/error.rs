//! Error types for field and form operations

use thiserror::Error;

/// Field error types
#[derive(Error, Debug)]
pub enum FieldError {
    /// Rule spec is neither a piped string nor a list of strings
    #[error("Invalid rule spec: {0}")]
    InvalidRuleSpec(String),

    /// A hook callback failed
    #[error("Hook `{event}` failed: {message}")]
    Hook { event: String, message: String },

    /// Rendering collaborator failed
    #[error("Render error: {0}")]
    Render(String),

    /// Configuration could not be loaded or installed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl FieldError {
    /// Hook failure for `event`.
    pub fn hook(event: impl Into<String>, message: impl Into<String>) -> Self {
        FieldError::Hook {
            event: event.into(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for FieldError {
    fn from(err: serde_json::Error) -> Self {
        FieldError::Serialization(err.to_string())
    }
}

/// Result type for field operations
pub type FieldResult<T> = Result<T, FieldError>;
