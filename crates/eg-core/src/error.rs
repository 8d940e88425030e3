//! # AppError
//! 
//! Centralized error handling for the Event Guide ecosystem.
//! Every port trait returns these, so the API layer can map them to statuses.

use thiserror::Error;

/// The primary error type for all eg-core operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Resource not found (e.g., Event)
    #[error("{0} not found with ID {1}")]
    NotFound(String, String),

    /// The caller is known but lacks the admin capability
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// An interaction or admin command was invoked without a user identity
    #[error("authentication required")]
    Unauthenticated,

    /// Credentials were presented and rejected (e.g., wrong password)
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Validation failure (e.g., blank title, unsupported city)
    #[error("validation error: {0}")]
    ValidationError(String),

    /// Resource already exists (e.g., email already registered)
    #[error("conflict: {0}")]
    Conflict(String),

    /// Infrastructure failure (e.g., RNG unavailable, hashing failed)
    #[error("internal service error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn event_not_found(id: &str) -> Self {
        AppError::NotFound("Event".to_string(), id.to_string())
    }
}

/// A specialized Result type for Event Guide logic.
pub type Result<T> = std::result::Result<T, AppError>;
