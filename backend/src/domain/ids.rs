//! Sequential external identifier derivation.
//!
//! External identifiers continue a per-role numeric sequence drawn from the
//! most recently created credential record of that role. Student identifiers
//! are `<yy><code><NNNNN>`, where the year suffix and semester code come from
//! the semester supplied for the *new* record — crossing a semester boundary
//! changes the visible prefix while the numeric sequence keeps counting.
//! Faculty and admin identifiers are `F-NNNNN` / `A-NNNNN`.
//!
//! The read-then-increment pattern is racy under concurrent creation of the
//! same role; the store's uniqueness backstop catches collisions and the
//! onboarding coordinator retries (see `user_onboarding`).

use super::semester::AcademicSemester;
use super::user::Role;

/// Zero-padded width of the numeric sequence part.
pub const SEQUENCE_WIDTH: usize = 5;

/// Prefix length preceding the sequence in a student id (`yy` + code).
const STUDENT_PREFIX_LEN: usize = 4;
/// Prefix length preceding the sequence in a faculty/admin id (`X-`).
const ROLE_PREFIX_LEN: usize = 2;

/// Failures while deriving the next identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdGenerationError {
    /// The previous identifier carries no parsable numeric suffix.
    #[error("previous id '{id}' has no numeric suffix")]
    MalformedPrevious {
        /// The offending identifier.
        id: String,
    },
    /// The sequence space for the role is exhausted.
    #[error("id sequence exhausted after '{id}'")]
    SequenceExhausted {
        /// The last identifier issued.
        id: String,
    },
}

fn next_sequence(last_id: Option<&str>, prefix_len: usize) -> Result<u32, IdGenerationError> {
    let Some(last) = last_id else {
        return Ok(1);
    };
    let suffix = last
        .get(prefix_len..)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| IdGenerationError::MalformedPrevious { id: last.to_owned() })?;
    let current = suffix
        .parse::<u32>()
        .map_err(|_| IdGenerationError::MalformedPrevious { id: last.to_owned() })?;
    current
        .checked_add(1)
        .ok_or_else(|| IdGenerationError::SequenceExhausted { id: last.to_owned() })
}

/// Derive the next student identifier.
///
/// `last_id` is the external id of the most recently created student
/// credential, if any; `semester` is the semester supplied for the record
/// being created.
///
/// # Errors
/// [`IdGenerationError`] when the previous id cannot be parsed.
pub fn next_student_id(
    last_id: Option<&str>,
    semester: &AcademicSemester,
) -> Result<String, IdGenerationError> {
    let sequence = next_sequence(last_id, STUDENT_PREFIX_LEN)?;
    Ok(format!(
        "{:02}{}{:0width$}",
        semester.year.rem_euclid(100),
        semester.code.as_str(),
        sequence,
        width = SEQUENCE_WIDTH
    ))
}

/// Derive the next faculty or admin identifier.
///
/// # Errors
/// [`IdGenerationError`] when the previous id cannot be parsed.
pub fn next_role_id(role: Role, last_id: Option<&str>) -> Result<String, IdGenerationError> {
    let sequence = next_sequence(last_id, ROLE_PREFIX_LEN)?;
    Ok(format!(
        "{}-{:0width$}",
        role.prefix(),
        sequence,
        width = SEQUENCE_WIDTH
    ))
}
