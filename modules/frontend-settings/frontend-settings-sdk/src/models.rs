//! Public models for the frontend settings store.
//!
//! The field names follow the JSON wire format (`camelCase`), since the
//! documents are stored and exchanged as-is.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

use crate::errors::SettingsError;

/// Identity of the editor making a request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserContext {
    email: String,
}

impl UserContext {
    #[must_use]
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}

/// Which user, if any, holds editing rights over a document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockStatus {
    pub locked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::rfc3339::option"
    )]
    pub timestamp: Option<OffsetDateTime>,
}

impl LockStatus {
    #[must_use]
    pub fn unlocked() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn held_by(email: impl Into<String>, at: OffsetDateTime) -> Self {
        Self {
            locked: true,
            email: Some(email.into()),
            timestamp: Some(at),
        }
    }

    #[must_use]
    pub fn is_held_by(&self, email: &str) -> bool {
        self.locked && self.email.as_deref() == Some(email)
    }

    #[must_use]
    pub fn is_held_by_other(&self, email: &str) -> bool {
        self.locked && !self.is_held_by(email)
    }
}

/// A versioned settings document as returned by the store.
///
/// `user_email` echoes the identity of the caller, so that the client can
/// compare it with `lock_status.email` without knowing its own identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsDocument<V> {
    pub value: V,
    pub version: String,
    pub lock_status: LockStatus,
    pub user_email: String,
}

impl<V> SettingsDocument<V> {
    #[must_use]
    pub fn is_locked_by_me(&self) -> bool {
        self.lock_status.is_held_by(&self.user_email)
    }

    #[must_use]
    pub fn is_locked_by_other(&self) -> bool {
        self.lock_status.is_held_by_other(&self.user_email)
    }
}

impl SettingsDocument<Value> {
    /// Decode the raw JSON value into a statically known shape.
    ///
    /// # Errors
    /// Returns [`SettingsError::Validation`] if the value does not match `V`.
    pub fn decode<V: DeserializeOwned>(self) -> Result<SettingsDocument<V>, SettingsError> {
        let value = serde_json::from_value(self.value)
            .map_err(|e| SettingsError::validation("value", e.to_string()))?;
        Ok(SettingsDocument {
            value,
            version: self.version,
            lock_status: self.lock_status,
            user_email: self.user_email,
        })
    }
}

/// Body of a save request.
///
/// `archived` tests are appended to the archive in the same write that
/// replaces the value, so they are archived only if the save succeeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsUpdate<V> {
    pub value: V,
    pub version: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub archived: Vec<Value>,
}

impl<V> SettingsUpdate<V> {
    #[must_use]
    pub fn new(value: V, version: impl Into<String>) -> Self {
        Self {
            value,
            version: version.into(),
            archived: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_archived(mut self, archived: Vec<Value>) -> Self {
        self.archived = archived;
        self
    }
}

impl<V: Serialize> SettingsUpdate<V> {
    /// Encode the value as raw JSON for the object-safe API boundary.
    ///
    /// # Errors
    /// Returns [`SettingsError::Internal`] if serialization fails.
    pub fn encode(&self) -> Result<SettingsUpdate<Value>, SettingsError> {
        let value =
            serde_json::to_value(&self.value).map_err(|e| SettingsError::internal(e.to_string()))?;
        Ok(SettingsUpdate {
            value,
            version: self.version.clone(),
            archived: self.archived.clone(),
        })
    }
}

/// Value of every test-bearing settings document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestList<T> {
    pub tests: Vec<T>,
}

impl<T> Default for TestList<T> {
    fn default() -> Self {
        Self { tests: Vec::new() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::macros::datetime;

    #[test]
    fn lock_status_ownership() {
        let lock = LockStatus::held_by("a@example.com", datetime!(2025-01-01 10:00 UTC));
        assert!(lock.is_held_by("a@example.com"));
        assert!(!lock.is_held_by_other("a@example.com"));
        assert!(lock.is_held_by_other("b@example.com"));

        let free = LockStatus::unlocked();
        assert!(!free.is_held_by("a@example.com"));
        assert!(!free.is_held_by_other("a@example.com"));
    }

    #[test]
    fn document_uses_camel_case_wire_format() {
        let doc = SettingsDocument {
            value: json!({"tests": []}),
            version: "v1".to_owned(),
            lock_status: LockStatus::held_by("a@example.com", datetime!(2025-01-01 10:00 UTC)),
            user_email: "a@example.com".to_owned(),
        };

        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["lockStatus"]["locked"], true);
        assert_eq!(json["lockStatus"]["email"], "a@example.com");
        assert_eq!(json["lockStatus"]["timestamp"], "2025-01-01T10:00:00Z");
        assert_eq!(json["userEmail"], "a@example.com");
        assert!(doc.is_locked_by_me());
    }

    #[test]
    fn unlocked_status_omits_optional_fields() {
        let json = serde_json::to_string(&LockStatus::unlocked()).unwrap();
        assert_eq!(json, r#"{"locked":false}"#);

        let parsed: LockStatus = serde_json::from_str(r#"{"locked":false}"#).unwrap();
        assert_eq!(parsed, LockStatus::unlocked());
    }

    #[test]
    fn update_omits_empty_archive() {
        let plain = SettingsUpdate::new(json!({"tests": []}), "v1");
        assert_eq!(
            serde_json::to_value(&plain).unwrap(),
            json!({"value": {"tests": []}, "version": "v1"})
        );

        let parsed: SettingsUpdate<Value> = serde_json::from_value(json!({
            "value": {"tests": []},
            "version": "v1",
            "archived": [{"name": "OLD"}]
        }))
        .unwrap();
        assert_eq!(parsed.archived, vec![json!({"name": "OLD"})]);
    }

    #[test]
    fn decode_rejects_mismatched_shape() {
        let doc = SettingsDocument {
            value: json!({"tests": "not a list"}),
            version: "v1".to_owned(),
            lock_status: LockStatus::unlocked(),
            user_email: "a@example.com".to_owned(),
        };

        let err = doc.decode::<TestList<Value>>().unwrap_err();
        assert!(matches!(err, SettingsError::Validation { ref field, .. } if field == "value"));
    }
}
