//! Central failure taxonomy for the records backend.
//!
//! Every failure source in the system — structural validation, identifier
//! casts, request-shape validation, business rules, security-token checks and
//! unexpected faults — collapses into one [`ApiError`]. Components raise the
//! error at the point of detection and propagate it unchanged; only the
//! inbound HTTP adapter turns it into a response envelope.

use serde::{Deserialize, Serialize};

/// One offending path plus its message, as reported to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorMessage {
    /// Path of the offending field, or empty when the failure is not tied to
    /// a field.
    pub path: String,
    /// Human-readable description.
    pub message: String,
}

impl ErrorMessage {
    /// Build a message for a field path.
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Status class carried by explicitly raised business-rule violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainErrorCode {
    /// The request is well-formed but breaks a business rule.
    BadRequest,
    /// The caller may not perform this mutation.
    Unauthorized,
    /// The requested record does not exist.
    NotFound,
    /// A natural-key uniqueness rule would be violated.
    Conflict,
}

/// Uniform failure type raised by core components.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Schema-level field violations, one message per offending field.
    #[error("Validation Error")]
    Validation(Vec<ErrorMessage>),
    /// A value could not be coerced to the expected identifier type.
    #[error("Cast Error")]
    Cast {
        /// Path of the offending value.
        path: String,
    },
    /// Request-shape validation failure raised before the core runs.
    #[error("Validation Error")]
    InputSchema(Vec<ErrorMessage>),
    /// Explicitly raised business-rule violation.
    #[error("{message}")]
    Domain {
        /// HTTP-equivalent status class.
        code: DomainErrorCode,
        /// Caller-chosen message.
        message: String,
    },
    /// Anti-forgery or security-token violation.
    #[error("Invalid csrf token")]
    Forbidden,
    /// Unexpected type or syntax fault; the message is passed through.
    #[error("{0}")]
    RuntimeType(String),
    /// Fallback for failures no other arm classifies.
    #[error("Bad request")]
    Unknown,
}

impl ApiError {
    /// Business-rule violation answering 400.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Domain {
            code: DomainErrorCode::BadRequest,
            message: message.into(),
        }
    }

    /// Business-rule violation answering 401.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Domain {
            code: DomainErrorCode::Unauthorized,
            message: message.into(),
        }
    }

    /// Missing-record failure answering 404.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::Domain {
            code: DomainErrorCode::NotFound,
            message: message.into(),
        }
    }

    /// Natural-key collision answering 409.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Domain {
            code: DomainErrorCode::Conflict,
            message: message.into(),
        }
    }

    /// Single-field request-shape failure.
    pub fn input_schema(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InputSchema(vec![ErrorMessage::new(path, message)])
    }

    /// Identifier cast failure for a path.
    pub fn cast(path: impl Into<String>) -> Self {
        Self::Cast { path: path.into() }
    }

    /// Whether this failure is a [`DomainErrorCode::Conflict`].
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::Domain {
                code: DomainErrorCode::Conflict,
                ..
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_passes_domain_message_through() {
        let err = ApiError::conflict("Semester with the same title and year already exists.");
        assert_eq!(
            err.to_string(),
            "Semester with the same title and year already exists."
        );
        assert!(err.is_conflict());
    }

    #[test]
    fn fallback_is_a_generic_bad_request() {
        assert_eq!(ApiError::Unknown.to_string(), "Bad request");
    }
}
