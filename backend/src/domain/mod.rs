//! Domain core: entities, ports, and the services behind each entity surface.

pub mod academic_department;
pub mod academic_department_service;
pub mod academic_faculty;
pub mod academic_faculty_service;
pub mod error;
pub mod faculty_member;
pub mod faculty_member_service;
pub mod ids;
pub mod ports;
pub mod profile;
pub mod query;
pub mod semester;
pub mod semester_service;
pub mod student;
pub mod student_service;
pub mod user;
pub mod user_onboarding;

pub use error::{ApiError, DomainErrorCode, ErrorMessage};

use pagination::{Pagination, PaginationError, PaginationOptions};
use tracing::error;

use ports::StoreError;

/// Map a store failure into the central taxonomy.
///
/// Duplicate-key backstops surface as conflicts; anything else is logged and
/// collapses into the unknown fallback so adapter detail never leaks to
/// clients.
pub(crate) fn map_store_error(err: StoreError) -> ApiError {
    match err {
        StoreError::DuplicateKey {
            collection, key, ..
        } => ApiError::conflict(format!("{collection} with the same {key} already exists")),
        StoreError::Query { message } => {
            error!(error = %message, "store query failed");
            ApiError::Unknown
        }
    }
}

/// Normalise raw pagination options, rejecting malformed numeric input as a
/// request-shape failure.
pub(crate) fn normalise_options(options: &PaginationOptions) -> Result<Pagination, ApiError> {
    options
        .normalise()
        .map_err(|err: PaginationError| ApiError::input_schema(err.field(), err.to_string()))
}
