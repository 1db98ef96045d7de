//! Shared request-shape validation helpers.
//!
//! Validators collect every offending field before failing so clients see
//! the whole list at once, mirroring the request-schema behaviour of the
//! original API surface. Paths report the innermost field name.

use uuid::Uuid;

use crate::domain::{ApiError, ErrorMessage};

/// Accumulator for request-shape violations.
#[derive(Debug, Default)]
pub(crate) struct FieldErrors {
    messages: Vec<ErrorMessage>,
}

impl FieldErrors {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.messages.push(ErrorMessage::new(path, message));
    }

    /// Fail with everything collected so far, or pass.
    pub(crate) fn finish(self) -> Result<(), ApiError> {
        if self.messages.is_empty() {
            Ok(())
        } else {
            Err(ApiError::InputSchema(self.messages))
        }
    }
}

/// Require a non-blank string, trimming surrounding whitespace.
pub(crate) fn required_string(
    errors: &mut FieldErrors,
    path: &str,
    value: Option<String>,
    message: &str,
) -> Option<String> {
    let trimmed = value.map(|v| v.trim().to_owned());
    match trimmed {
        Some(v) if !v.is_empty() => Some(v),
        _ => {
            errors.push(path, message);
            None
        }
    }
}

/// Trim an optional string, treating blank input as absent.
pub(crate) fn optional_string(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// Require a member of a fixed vocabulary.
pub(crate) fn required_enum<T>(
    errors: &mut FieldErrors,
    path: &str,
    value: Option<String>,
    parse: fn(&str) -> Option<T>,
    required_message: &str,
    invalid_message: &str,
) -> Option<T> {
    let Some(raw) = required_string(errors, path, value, required_message) else {
        return None;
    };
    let parsed = parse(&raw);
    if parsed.is_none() {
        errors.push(path, invalid_message);
    }
    parsed
}

/// Parse an optional vocabulary member, rejecting unknown values.
pub(crate) fn optional_enum<T>(
    errors: &mut FieldErrors,
    path: &str,
    value: Option<String>,
    parse: fn(&str) -> Option<T>,
    invalid_message: &str,
) -> Option<T> {
    let raw = optional_string(value)?;
    let parsed = parse(&raw);
    if parsed.is_none() {
        errors.push(path, invalid_message);
    }
    parsed
}

/// Require a reference carried as a uuid string in a request body.
pub(crate) fn required_reference(
    errors: &mut FieldErrors,
    path: &str,
    value: Option<String>,
    required_message: &str,
    invalid_message: &str,
) -> Option<Uuid> {
    let raw = required_string(errors, path, value, required_message)?;
    let parsed = Uuid::parse_str(&raw).ok();
    if parsed.is_none() {
        errors.push(path, invalid_message);
    }
    parsed
}

/// Require a lowercased, plausibly shaped email address.
pub(crate) fn required_email(
    errors: &mut FieldErrors,
    path: &str,
    value: Option<String>,
    required_message: &str,
) -> Option<String> {
    let raw = required_string(errors, path, value, required_message)?;
    let lowered = raw.to_lowercase();
    if is_email(&lowered) {
        Some(lowered)
    } else {
        errors.push(path, "Invalid email");
        None
    }
}

/// Validate an optional email, lowercasing it when present.
pub(crate) fn optional_email(
    errors: &mut FieldErrors,
    path: &str,
    value: Option<String>,
) -> Option<String> {
    let raw = optional_string(value)?;
    let lowered = raw.to_lowercase();
    if is_email(&lowered) {
        Some(lowered)
    } else {
        errors.push(path, "Invalid email");
        None
    }
}

fn is_email(value: &str) -> bool {
    value
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'))
}

/// Parse a path segment as a record identifier, surfacing a cast failure.
pub(crate) fn parse_record_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::cast("id"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn collected_failures_become_one_schema_error() {
        let mut errors = FieldErrors::new();
        errors.push("title", "Semester title is required");
        errors.push("year", "Year must be a number");
        let err = errors.finish().expect_err("two failures collected");
        match err {
            ApiError::InputSchema(messages) => assert_eq!(messages.len(), 2),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn blank_strings_count_as_missing() {
        let mut errors = FieldErrors::new();
        let value = required_string(&mut errors, "title", Some("   ".to_owned()), "required");
        assert!(value.is_none());
        assert!(errors.finish().is_err());
    }

    #[rstest]
    #[case("Ada@Example.COM", Some("ada@example.com"))]
    #[case("no-at-sign", None)]
    #[case("@example.com", None)]
    #[case("ada@nodot", None)]
    fn emails_are_lowercased_and_shape_checked(
        #[case] raw: &str,
        #[case] expected: Option<&str>,
    ) {
        let mut errors = FieldErrors::new();
        let value = required_email(&mut errors, "email", Some(raw.to_owned()), "required");
        assert_eq!(value.as_deref(), expected);
    }

    #[test]
    fn malformed_path_ids_are_cast_failures() {
        let err = parse_record_id("not-a-uuid").expect_err("rejects");
        assert!(matches!(err, ApiError::Cast { .. }));
    }
}
