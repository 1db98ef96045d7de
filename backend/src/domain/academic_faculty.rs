//! Academic faculty entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fields eligible for free-text search on faculty listings.
pub const ACADEMIC_FACULTY_SEARCHABLE_FIELDS: &[&str] = &["title"];

/// Persisted academic faculty document. Owns zero or more departments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicFaculty {
    /// Store-generated identifier.
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// Unique natural key.
    pub title: String,
    pub created_at: DateTime<Utc>,
}

impl AcademicFaculty {
    /// Materialise a new faculty document.
    #[must_use]
    pub fn create(title: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            created_at: Utc::now(),
        }
    }

    /// Apply a partial update in place.
    pub fn apply_update(&mut self, update: &AcademicFacultyUpdate) {
        if let Some(value) = &update.title {
            self.title = value.clone();
        }
    }
}

/// Partial update payload for an academic faculty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AcademicFacultyUpdate {
    pub title: Option<String>,
}
