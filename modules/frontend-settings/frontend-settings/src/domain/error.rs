use frontend_settings_sdk::SettingsError;

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Settings are locked by {holder}")]
    LockConflict { holder: String },

    #[error("Version '{supplied}' is stale, current version is '{current}'")]
    VersionConflict { supplied: String, current: String },

    #[error("Validation error on field '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl DomainError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<DomainError> for SettingsError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::LockConflict { holder } => Self::lock_conflict(Some(holder)),
            DomainError::VersionConflict { .. } => Self::VersionConflict,
            DomainError::Validation { field, message } => Self::validation(field, message),
            DomainError::Internal(msg) => Self::internal(msg),
            DomainError::Storage(e) => Self::internal(e.to_string()),
        }
    }
}
