//! Rules for test and variant names.

use crate::error::EditorError;

/// Reject blank names and names with surrounding whitespace.
///
/// # Errors
/// Returns [`EditorError::InvalidName`].
pub fn validate_name(name: &str) -> Result<(), EditorError> {
    if name.is_empty() {
        return Err(EditorError::invalid_name(name, "name must not be empty"));
    }
    if name.trim() != name {
        return Err(EditorError::invalid_name(
            name,
            "name must not start or end with whitespace",
        ));
    }
    Ok(())
}

/// Check `name` against existing names, ignoring case.
///
/// # Errors
/// Returns [`EditorError::DuplicateName`] when `name` is already taken.
pub fn ensure_unique<'a>(
    name: &str,
    existing: impl IntoIterator<Item = &'a str>,
) -> Result<(), EditorError> {
    if existing
        .into_iter()
        .any(|taken| taken.eq_ignore_ascii_case(name))
    {
        return Err(EditorError::DuplicateName {
            name: name.to_owned(),
        });
    }
    Ok(())
}

/// Validate a new name and check it is free.
///
/// # Errors
/// See [`validate_name`] and [`ensure_unique`].
pub fn check_new_name<'a>(
    name: &str,
    existing: impl IntoIterator<Item = &'a str>,
) -> Result<(), EditorError> {
    validate_name(name)?;
    ensure_unique(name, existing)
}
