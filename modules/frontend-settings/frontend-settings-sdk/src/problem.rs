//! RFC 9457 Problem Details returned by the settings API on failure.
//!
//! The `code` member carries a stable machine-readable error code that
//! clients use to map a failed response back onto [`SettingsError`].

use http::StatusCode;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::SettingsError;

/// Content type for Problem Details as per RFC 9457.
pub const APPLICATION_PROBLEM_JSON: &str = "application/problem+json";

/// Stable error codes carried in [`Problem::code`].
pub mod codes {
    pub const LOCK_CONFLICT: &str = "LOCK_CONFLICT";
    pub const VERSION_CONFLICT: &str = "VERSION_CONFLICT";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const VALIDATION: &str = "VALIDATION";
    pub const INTERNAL: &str = "INTERNAL";
}

#[allow(clippy::trivially_copy_pass_by_ref)] // serde requires &T signature
fn serialize_status_code<S>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u16(status.as_u16())
}

fn deserialize_status_code<'de, D>(deserializer: D) -> Result<StatusCode, D::Error>
where
    D: Deserializer<'de>,
{
    let code = u16::deserialize(deserializer)?;
    StatusCode::from_u16(code).map_err(serde::de::Error::custom)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[must_use]
pub struct Problem {
    #[serde(rename = "type")]
    pub type_url: String,
    pub title: String,
    #[serde(
        serialize_with = "serialize_status_code",
        deserialize_with = "deserialize_status_code"
    )]
    pub status: StatusCode,
    pub detail: String,
    #[serde(default)]
    pub instance: String,
    #[serde(default)]
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
    /// Field that failed validation, for `VALIDATION` problems.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Current lock holder, for `LOCK_CONFLICT` problems.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holder: Option<String>,
}

impl Problem {
    pub fn new(status: StatusCode, title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            type_url: "about:blank".to_owned(),
            title: title.into(),
            status,
            detail: detail.into(),
            instance: String::new(),
            code: String::new(),
            trace_id: None,
            field: None,
            holder: None,
        }
    }

    pub fn with_type(mut self, type_url: impl Into<String>) -> Self {
        self.type_url = type_url.into();
        self
    }

    pub fn with_instance(mut self, uri: impl Into<String>) -> Self {
        self.instance = uri.into();
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn with_holder(mut self, holder: Option<String>) -> Self {
        self.holder = holder;
        self
    }

    /// Map the problem back onto the SDK error taxonomy.
    ///
    /// Unknown codes fall back on the HTTP status class.
    #[must_use]
    pub fn into_settings_error(self) -> SettingsError {
        match self.code.as_str() {
            codes::LOCK_CONFLICT => SettingsError::LockConflict {
                holder: self.holder,
            },
            codes::VERSION_CONFLICT => SettingsError::VersionConflict,
            codes::NOT_FOUND => SettingsError::NotFound,
            codes::UNAUTHORIZED => SettingsError::Unauthorized,
            codes::VALIDATION => SettingsError::Validation {
                field: self.field.unwrap_or_else(|| "value".to_owned()),
                message: self.detail,
            },
            _ => match self.status {
                StatusCode::NOT_FOUND => SettingsError::NotFound,
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => SettingsError::Unauthorized,
                status if status.is_server_error() => SettingsError::Internal(self.detail),
                _ => SettingsError::Network(format!("HTTP {}: {}", self.status, self.detail)),
            },
        }
    }
}

/// Axum integration: make Problem directly usable as a response
#[cfg(feature = "axum")]
impl axum::response::IntoResponse for Problem {
    fn into_response(self) -> axum::response::Response {
        use axum::http::HeaderValue;

        let status = self.status;
        let mut resp = axum::Json(self).into_response();
        *resp.status_mut() = status;
        resp.headers_mut().insert(
            axum::http::header::CONTENT_TYPE,
            HeaderValue::from_static(APPLICATION_PROBLEM_JSON),
        );
        resp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn problem_serializes_status_as_u16() {
        let p = Problem::new(StatusCode::CONFLICT, "Conflict", "locked")
            .with_code(codes::LOCK_CONFLICT)
            .with_holder(Some("a@example.com".to_owned()));
        let json = serde_json::to_value(&p).unwrap();

        assert_eq!(json["status"], 409);
        assert_eq!(json["code"], "LOCK_CONFLICT");
        assert_eq!(json["holder"], "a@example.com");
        assert!(json.get("field").is_none());
    }

    #[test]
    fn codes_map_to_tagged_errors() {
        let lock = Problem::new(StatusCode::CONFLICT, "Conflict", "locked")
            .with_code(codes::LOCK_CONFLICT)
            .with_holder(Some("a@example.com".to_owned()));
        assert_eq!(
            lock.into_settings_error(),
            SettingsError::lock_conflict(Some("a@example.com".to_owned()))
        );

        let version = Problem::new(StatusCode::CONFLICT, "Conflict", "stale")
            .with_code(codes::VERSION_CONFLICT);
        assert_eq!(version.into_settings_error(), SettingsError::VersionConflict);

        let invalid = Problem::new(StatusCode::BAD_REQUEST, "Bad Request", "missing name")
            .with_code(codes::VALIDATION)
            .with_field("value");
        assert_eq!(
            invalid.into_settings_error(),
            SettingsError::validation("value", "missing name")
        );
    }

    #[test]
    fn unknown_codes_fall_back_on_status() {
        let p = Problem::new(StatusCode::BAD_GATEWAY, "Bad Gateway", "upstream down");
        assert_eq!(
            p.into_settings_error(),
            SettingsError::internal("upstream down")
        );

        let p = Problem::new(StatusCode::NOT_FOUND, "Not Found", "");
        assert_eq!(p.into_settings_error(), SettingsError::NotFound);
    }

    #[test]
    fn deserializes_minimal_problem() {
        let json = r#"{"type":"about:blank","title":"Conflict","status":409,"detail":"stale","code":"VERSION_CONFLICT"}"#;
        let p: Problem = serde_json::from_str(json).unwrap();
        assert_eq!(p.status, StatusCode::CONFLICT);
        assert_eq!(p.instance, "");
        assert_eq!(p.into_settings_error(), SettingsError::VersionConflict);
    }
}
