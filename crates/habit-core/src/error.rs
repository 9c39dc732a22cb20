//! Error types for the habit tracker client.

use thiserror::Error;

use crate::validation::ValidationErrors;

/// A shared error type for the entire client.
///
/// Validation failures block a submission before any request is issued;
/// every other variant describes a failed round trip or a local resource
/// problem. None of them is fatal to the process.
#[derive(Error, Debug, Clone)]
pub enum HabitError {
    /// One or more form fields violated their schema
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// Network failure or non-2xx response from the service
    #[error("Request failed{}: {message}", status.map(|s| format!(" ({})", s)).unwrap_or_default())]
    Request {
        status: Option<u16>,
        message: String,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// IO error (token file, config file)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// An operation requires a signed-in session
    #[error("Not signed in")]
    Unauthenticated,

    /// A task operation was attempted with no goal selected
    #[error("No goal selected")]
    NoGoalSelected,

    /// The completion toggle for this task is already in flight
    #[error("Toggle already in progress for task '{0}'")]
    ToggleInFlight(String),

    /// Entity not found in the current view state
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl HabitError {
    /// Creates a Request error
    pub fn request(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Request {
            status,
            message: message.into(),
        }
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a transport/server error
    pub fn is_request(&self) -> bool {
        matches!(self, Self::Request { .. })
    }

    /// Returns the HTTP status of a failed request, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Request { status, .. } => *status,
            _ => None,
        }
    }

    /// Check if the server rejected the bearer token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthenticated) || matches!(self.status(), Some(401) | Some(403))
    }
}

impl From<ValidationErrors> for HabitError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<std::io::Error> for HabitError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for HabitError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for HabitError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for HabitError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for HabitError {
    fn from(err: reqwest::Error) -> Self {
        Self::Request {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

impl From<url::ParseError> for HabitError {
    fn from(err: url::ParseError) -> Self {
        Self::Config(format!("Invalid URL: {}", err))
    }
}

/// A type alias for `Result<T, HabitError>`.
pub type Result<T> = std::result::Result<T, HabitError>;
