//! HTTP rendering of the central failure taxonomy.
//!
//! Purpose: keep [`ApiError`] transport-agnostic while giving every Actix
//! handler one consistent JSON error envelope and status code. Payload
//! deserialisation failures and unmatched routes are normalised here too so
//! no failure path bypasses the envelope.

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::domain::{ApiError, DomainErrorCode, ErrorMessage};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Fixed explanation attached to identifier cast failures.
const CAST_MESSAGE: &str = "Value is not a valid record identifier";

/// Message served by the catch-all route.
const PATH_NOT_FOUND: &str = "The requested path could not be found";

fn status_for(err: &ApiError) -> StatusCode {
    match err {
        ApiError::Validation(_)
        | ApiError::Cast { .. }
        | ApiError::InputSchema(_)
        | ApiError::RuntimeType(_)
        | ApiError::Unknown => StatusCode::BAD_REQUEST,
        ApiError::Domain { code, .. } => match code {
            DomainErrorCode::BadRequest => StatusCode::BAD_REQUEST,
            DomainErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            DomainErrorCode::NotFound => StatusCode::NOT_FOUND,
            DomainErrorCode::Conflict => StatusCode::CONFLICT,
        },
        ApiError::Forbidden => StatusCode::FORBIDDEN,
    }
}

/// Wire form of a normalised failure.
///
/// `stack` carries the debug rendering of the failure in development builds
/// and is always empty otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    pub success: bool,
    pub status_code: u16,
    pub message: String,
    pub error_messages: Vec<ErrorMessage>,
    pub stack: String,
}

impl ErrorEnvelope {
    /// Classify one failure into the uniform envelope.
    #[must_use]
    pub fn from_error(err: &ApiError) -> Self {
        let error_messages = match err {
            ApiError::Validation(messages) | ApiError::InputSchema(messages) => messages.clone(),
            ApiError::Cast { path } => vec![ErrorMessage::new(path.clone(), CAST_MESSAGE)],
            ApiError::Domain { message, .. } => {
                if message.is_empty() {
                    Vec::new()
                } else {
                    vec![ErrorMessage::new("", message.clone())]
                }
            }
            ApiError::Forbidden => vec![ErrorMessage::new("", err.to_string())],
            ApiError::RuntimeType(message) => {
                if message.is_empty() {
                    Vec::new()
                } else {
                    vec![ErrorMessage::new("", message.clone())]
                }
            }
            // The fallback deliberately reveals nothing.
            ApiError::Unknown => Vec::new(),
        };

        let stack = if cfg!(debug_assertions) {
            format!("{err:?}")
        } else {
            String::new()
        };

        Self {
            success: false,
            status_code: status_for(err).as_u16(),
            message: err.to_string(),
            error_messages,
            stack,
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        status_for(self)
    }

    fn error_response(&self) -> HttpResponse {
        let envelope = ErrorEnvelope::from_error(self);
        error!(
            status = envelope.status_code,
            message = %envelope.message,
            "request failed"
        );
        HttpResponse::build(self.status_code()).json(envelope)
    }
}

/// Normalise a JSON body failure (malformed syntax, wrong types) into the
/// taxonomy before it ever reaches a handler.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::RuntimeType(err.to_string()).into()
}

/// Normalise a query-string failure the same way.
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::RuntimeType(err.to_string()).into()
}

/// Catch-all for unmatched routes, echoing the offending path.
pub async fn unmatched_route(req: HttpRequest) -> HttpResponse {
    let envelope = ErrorEnvelope {
        success: false,
        status_code: StatusCode::NOT_FOUND.as_u16(),
        message: PATH_NOT_FOUND.to_owned(),
        error_messages: vec![ErrorMessage::new(req.path(), PATH_NOT_FOUND)],
        stack: String::new(),
    };
    HttpResponse::NotFound().json(envelope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use rstest::rstest;

    fn envelope_of(err: &ApiError) -> ErrorEnvelope {
        ErrorEnvelope::from_error(err)
    }

    #[rstest]
    #[case(ApiError::Unknown, 400)]
    #[case(ApiError::bad_request("nope"), 400)]
    #[case(ApiError::unauthorized("nope"), 401)]
    #[case(ApiError::not_found("nope"), 404)]
    #[case(ApiError::conflict("nope"), 409)]
    #[case(ApiError::Forbidden, 403)]
    #[case(ApiError::cast("id"), 400)]
    #[case(ApiError::RuntimeType("boom".to_owned()), 400)]
    fn status_codes_follow_the_taxonomy(#[case] err: ApiError, #[case] status: u16) {
        assert_eq!(envelope_of(&err).status_code, status);
        assert!(!envelope_of(&err).success);
    }

    #[test]
    fn unknown_failures_reveal_nothing() {
        let envelope = envelope_of(&ApiError::Unknown);
        assert_eq!(envelope.message, "Bad request");
        assert!(envelope.error_messages.is_empty());
    }

    #[test]
    fn domain_failures_repeat_their_message_with_an_empty_path() {
        let envelope = envelope_of(&ApiError::conflict("Semester already exists"));
        assert_eq!(envelope.message, "Semester already exists");
        assert_eq!(
            envelope.error_messages,
            vec![ErrorMessage::new("", "Semester already exists")]
        );
    }

    #[test]
    fn cast_failures_name_the_offending_path() {
        let envelope = envelope_of(&ApiError::cast("id"));
        assert_eq!(envelope.message, "Cast Error");
        assert_eq!(envelope.error_messages.len(), 1);
        assert_eq!(envelope.error_messages[0].path, "id");
    }

    #[test]
    fn schema_failures_keep_one_message_per_field() {
        let envelope = envelope_of(&ApiError::InputSchema(vec![
            ErrorMessage::new("title", "Semester title is required"),
            ErrorMessage::new("year", "Year must be a number"),
        ]));
        assert_eq!(envelope.status_code, 400);
        assert_eq!(envelope.message, "Validation Error");
        assert_eq!(envelope.error_messages.len(), 2);
    }

    #[actix_rt::test]
    async fn response_body_is_the_envelope() {
        let response = ApiError::not_found("We couldn't find it").error_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let bytes = to_bytes(response.into_body())
            .await
            .expect("body collects");
        let envelope: ErrorEnvelope = serde_json::from_slice(&bytes).expect("envelope parses");
        assert_eq!(envelope.status_code, 404);
        assert_eq!(envelope.message, "We couldn't find it");
    }
}
