//! Error types for the frontend settings SDK.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// The document lock is held by someone else.
    #[error(
        "Settings are locked by {}",
        .holder.as_deref().unwrap_or("another user")
    )]
    LockConflict { holder: Option<String> },

    /// The document changed on the server since the caller fetched it.
    #[error("Settings were modified by someone else since they were fetched")]
    VersionConflict,

    #[error("Settings not found")]
    NotFound,

    #[error("Missing or unknown user identity")]
    Unauthorized,

    #[error("Validation error on field '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SettingsError {
    #[must_use]
    pub fn lock_conflict(holder: Option<String>) -> Self {
        Self::LockConflict { holder }
    }

    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Conflicts are recoverable by refetching; everything else is not.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::LockConflict { .. } | Self::VersionConflict)
    }
}
