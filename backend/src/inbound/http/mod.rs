//! HTTP inbound adapter exposing the REST surface.
//!
//! Handlers stay thin: deserialise, validate the request shape, call one
//! domain service, wrap the outcome in the shared response envelope. Every
//! failure funnels through [`error`], which renders the uniform error
//! envelope.

pub mod academic_departments;
pub mod academic_faculties;
pub mod error;
pub mod faculty_members;
pub mod health;
pub mod response;
pub mod semesters;
pub mod state;
pub mod students;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;
