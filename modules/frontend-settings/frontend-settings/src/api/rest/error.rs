use axum::http::StatusCode;
use frontend_settings_sdk::Problem;
use frontend_settings_sdk::problem::codes;

use crate::domain::error::DomainError;

pub type ApiResult<T> = Result<T, Problem>;

const ERROR_TYPE_BASE: &str = "https://errors.promo-console.dev";

/// Map domain error to RFC 9457 Problem
pub fn domain_error_to_problem(e: &DomainError, instance: &str) -> Problem {
    let trace_id = tracing::Span::current()
        .id()
        .map(|id| id.into_u64().to_string());

    let problem = match e {
        DomainError::LockConflict { holder } => problem(
            StatusCode::CONFLICT,
            codes::LOCK_CONFLICT,
            "Conflict",
            format!("Settings are locked by {holder}"),
        )
        .with_holder(Some(holder.clone())),
        DomainError::VersionConflict { .. } => problem(
            StatusCode::CONFLICT,
            codes::VERSION_CONFLICT,
            "Conflict",
            e.to_string(),
        ),
        DomainError::Validation { field, message } => problem(
            StatusCode::BAD_REQUEST,
            codes::VALIDATION,
            "Bad Request",
            format!("Validation error on '{field}': {message}"),
        )
        .with_field(field.clone()),
        DomainError::Internal(_) | DomainError::Storage(_) => {
            tracing::error!(error = ?e, "Settings store failure");
            problem(
                StatusCode::INTERNAL_SERVER_ERROR,
                codes::INTERNAL,
                "Internal Server Error",
                "An internal error occurred".to_owned(),
            )
        }
    }
    .with_instance(instance);

    match trace_id {
        Some(id) => problem.with_trace_id(id),
        None => problem,
    }
}

pub fn problem(status: StatusCode, code: &str, title: &str, detail: String) -> Problem {
    Problem::new(status, title, detail)
        .with_type(format!("{ERROR_TYPE_BASE}/{code}"))
        .with_code(code)
}

/// Implement From<DomainError> for Problem so `?` works in handlers
impl From<DomainError> for Problem {
    fn from(e: DomainError) -> Self {
        domain_error_to_problem(&e, "/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_conflict_carries_holder() {
        let e = DomainError::LockConflict {
            holder: "alice@example.com".to_owned(),
        };
        let p = domain_error_to_problem(&e, "/frontend-settings/epicTests/lock");

        assert_eq!(p.status, StatusCode::CONFLICT);
        assert_eq!(p.code, codes::LOCK_CONFLICT);
        assert_eq!(p.holder.as_deref(), Some("alice@example.com"));
        assert_eq!(p.instance, "/frontend-settings/epicTests/lock");
    }

    #[test]
    fn version_conflict_is_distinct_from_lock_conflict() {
        let e = DomainError::VersionConflict {
            supplied: "a".to_owned(),
            current: "b".to_owned(),
        };
        let p: Problem = e.into();

        assert_eq!(p.status, StatusCode::CONFLICT);
        assert_eq!(p.code, codes::VERSION_CONFLICT);
        assert!(p.holder.is_none());
    }

    #[test]
    fn storage_errors_do_not_leak_details() {
        let e = DomainError::Storage(anyhow::anyhow!("disk on fire"));
        let p: Problem = e.into();

        assert_eq!(p.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!p.detail.contains("disk"));
    }
}
