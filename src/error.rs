//! Error types for link configuration, lookup and rendering.
//!
//! Validation failures, broken references and missing link capabilities are
//! *not* errors: they are returned as values
//! ([`crate::application::services::ValidationResult`] and
//! [`crate::domain::entities::LinkUrl`]). Only the cases below propagate.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LinkError>;

#[derive(Debug, Error)]
pub enum LinkError {
    /// Registry or environment configuration is inconsistent.
    ///
    /// Raised during startup; callers are expected to abort initialization.
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// An operation was invoked on input it cannot handle, such as a class
    /// that is not part of the record hierarchy.
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// The entity lookup collaborator failed.
    #[error("lookup failed for {kind} #{id}: {message}")]
    Lookup {
        kind: String,
        id: i64,
        message: String,
    },

    /// The link store failed.
    #[error("persistence error: {message}")]
    Persistence { message: String },

    /// No template could render the link.
    #[error("render error: {message}")]
    Render { message: String },
}

impl LinkError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn lookup(kind: impl Into<String>, id: i64, message: impl Into<String>) -> Self {
        Self::Lookup {
            kind: kind.into(),
            id,
            message: message.into(),
        }
    }

    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence {
            message: message.into(),
        }
    }

    pub fn render(message: impl Into<String>) -> Self {
        Self::Render {
            message: message.into(),
        }
    }

    /// Returns true for errors that should abort startup.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }
}

impl From<askama::Error> for LinkError {
    fn from(e: askama::Error) -> Self {
        Self::render(e.to_string())
    }
}
