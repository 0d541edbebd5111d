//! Request extractors shared by the handlers.

use axum::extract::{FromRequestParts, Path};
use axum::http::StatusCode;
use axum::http::request::Parts;
use frontend_settings_sdk::problem::codes;
use frontend_settings_sdk::{Problem, SettingsType, USER_EMAIL_HEADER, UserContext};

use super::error::problem;

/// The editor identity taken from the `x-user-email` header.
pub struct Editor(pub UserContext);

impl<S: Send + Sync> FromRequestParts<S> for Editor {
    type Rejection = Problem;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let email = parts
            .headers
            .get(USER_EMAIL_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                problem(
                    StatusCode::UNAUTHORIZED,
                    codes::UNAUTHORIZED,
                    "Unauthorized",
                    format!("missing {USER_EMAIL_HEADER} header"),
                )
                .with_instance(parts.uri.path())
            })?;
        Ok(Self(UserContext::new(email)))
    }
}

/// The `{settings_type}` path segment, resolved against the lookup table.
pub struct Settings(pub SettingsType);

impl<S: Send + Sync> FromRequestParts<S> for Settings {
    type Rejection = Problem;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let instance = parts.uri.path().to_owned();
        let not_found = |detail: String| {
            problem(StatusCode::NOT_FOUND, codes::NOT_FOUND, "Not Found", detail)
                .with_instance(instance.as_str())
        };

        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| not_found(e.body_text()))?;
        raw.parse()
            .map(Self)
            .map_err(|e: frontend_settings_sdk::settings_type::UnknownSettingsType| {
                not_found(e.to_string())
            })
    }
}
