use frontend_settings_sdk::SettingsError;

/// Failures of editor actions.
///
/// Every failure that the user should see has already been passed to the
/// session's [`Notifier`](crate::Notifier) by the time it is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditorError {
    /// The action needs the document lock and this editor does not hold it.
    #[error("Settings are read-only: the lock is not held by this editor")]
    ReadOnly,

    #[error("Test contains invalid fields: {}", .fields.join(", "))]
    ValidationFailed { fields: Vec<String> },

    #[error("Name '{name}' is already in use")]
    DuplicateName { name: String },

    #[error("Unknown test '{0}'")]
    UnknownTest(String),

    #[error("Unknown variant '{0}'")]
    UnknownVariant(String),

    #[error("Invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("No test is selected")]
    NoTestSelected,

    #[error("Invalid editor configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Settings(#[from] SettingsError),
}

impl EditorError {
    pub(crate) fn invalid_name(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidName {
            name: name.to_owned(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_failure_lists_fields() {
        let err = EditorError::ValidationFailed {
            fields: vec!["variants.control.heading".to_owned(), "variants".to_owned()],
        };
        assert_eq!(
            err.to_string(),
            "Test contains invalid fields: variants.control.heading, variants"
        );
    }

    #[test]
    fn settings_errors_pass_through() {
        let err: EditorError = SettingsError::VersionConflict.into();
        assert_eq!(err.to_string(), SettingsError::VersionConflict.to_string());
    }
}
