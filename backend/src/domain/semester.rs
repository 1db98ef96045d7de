//! Academic semester entity and its fixed vocabulary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::ApiError;

/// Inclusive bounds accepted for a semester year.
pub const MIN_SEMESTER_YEAR: i32 = 2023;
/// Upper bound accepted for a semester year.
pub const MAX_SEMESTER_YEAR: i32 = 2100;

/// Fields eligible for free-text search on semester listings.
pub const SEMESTER_SEARCHABLE_FIELDS: &[&str] = &["title", "code", "year"];

/// Semester title vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SemesterTitle {
    /// First semester of the academic year.
    Autumn,
    /// Second semester.
    Summer,
    /// Third semester.
    Fall,
}

impl SemesterTitle {
    /// Parse the wire form of a title.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Autumn" => Some(Self::Autumn),
            "Summer" => Some(Self::Summer),
            "Fall" => Some(Self::Fall),
            _ => None,
        }
    }

    /// The code each title must carry.
    #[must_use]
    pub const fn code(self) -> SemesterCode {
        match self {
            Self::Autumn => SemesterCode::C01,
            Self::Summer => SemesterCode::C02,
            Self::Fall => SemesterCode::C03,
        }
    }
}

/// Semester code vocabulary, tied to titles by a fixed mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SemesterCode {
    /// Autumn.
    #[serde(rename = "01")]
    C01,
    /// Summer.
    #[serde(rename = "02")]
    C02,
    /// Fall.
    #[serde(rename = "03")]
    C03,
}

impl SemesterCode {
    /// Parse the wire form of a code.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "01" => Some(Self::C01),
            "02" => Some(Self::C02),
            "03" => Some(Self::C03),
            _ => None,
        }
    }

    /// Wire form of the code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::C01 => "01",
            Self::C02 => "02",
            Self::C03 => "03",
        }
    }
}

/// Calendar month vocabulary for semester boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    /// Parse the wire form of a month name.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "January" => Some(Self::January),
            "February" => Some(Self::February),
            "March" => Some(Self::March),
            "April" => Some(Self::April),
            "May" => Some(Self::May),
            "June" => Some(Self::June),
            "July" => Some(Self::July),
            "August" => Some(Self::August),
            "September" => Some(Self::September),
            "October" => Some(Self::October),
            "November" => Some(Self::November),
            "December" => Some(Self::December),
            _ => None,
        }
    }
}

/// Persisted academic semester document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicSemester {
    /// Store-generated identifier.
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: SemesterTitle,
    pub year: i32,
    pub code: SemesterCode,
    pub start_month: Month,
    pub end_month: Month,
    pub created_at: DateTime<Utc>,
}

/// Validated payload for creating a semester.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSemester {
    pub title: SemesterTitle,
    pub year: i32,
    pub code: SemesterCode,
    pub start_month: Month,
    pub end_month: Month,
}

impl AcademicSemester {
    /// Materialise a new semester document from a validated payload.
    #[must_use]
    pub fn create(payload: NewSemester) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: payload.title,
            year: payload.year,
            code: payload.code,
            start_month: payload.start_month,
            end_month: payload.end_month,
            created_at: Utc::now(),
        }
    }

    /// Apply a partial update in place. Title/code consistency is enforced
    /// upstream.
    pub fn apply_update(&mut self, update: &SemesterUpdate) {
        let SemesterUpdate {
            title,
            year,
            code,
            start_month,
            end_month,
        } = update;

        if let Some(value) = title {
            self.title = *value;
        }
        if let Some(value) = year {
            self.year = *value;
        }
        if let Some(value) = code {
            self.code = *value;
        }
        if let Some(value) = start_month {
            self.start_month = *value;
        }
        if let Some(value) = end_month {
            self.end_month = *value;
        }
    }
}

/// Partial update payload for a semester.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SemesterUpdate {
    pub title: Option<SemesterTitle>,
    pub year: Option<i32>,
    pub code: Option<SemesterCode>,
    pub start_month: Option<Month>,
    pub end_month: Option<Month>,
}

impl SemesterUpdate {
    /// Enforce the title/code consistency rule on a partial update.
    ///
    /// The check only runs when the update actually touches title or code;
    /// partial updates of unrelated fields are never rejected. Touching one
    /// of the pair without the other is ambiguous and is refused.
    ///
    /// # Errors
    /// [`ApiError`] with bad-request semantics when the pair is incomplete or
    /// the fixed mapping is violated.
    pub fn ensure_title_code_consistent(&self) -> Result<(), ApiError> {
        match (self.title, self.code) {
            (None, None) => Ok(()),
            (Some(title), Some(code)) if title.code() == code => Ok(()),
            (Some(_), Some(_)) => Err(ApiError::bad_request("Invalid semester code")),
            _ => Err(ApiError::bad_request(
                "Semester title and code must be updated together",
            )),
        }
    }
}
