//! Academic department entity and its populated read projection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::academic_faculty::AcademicFaculty;

/// Fields eligible for free-text search on department listings.
pub const ACADEMIC_DEPARTMENT_SEARCHABLE_FIELDS: &[&str] = &["title"];

/// Persisted academic department document.
///
/// `academic_faculty` is a non-owning reference and must point at an existing
/// faculty when the department is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicDepartment {
    /// Store-generated identifier.
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// Unique natural key.
    pub title: String,
    /// Owning faculty reference.
    pub academic_faculty: Uuid,
    pub created_at: DateTime<Utc>,
}

impl AcademicDepartment {
    /// Materialise a new department document.
    #[must_use]
    pub fn create(title: String, academic_faculty: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            academic_faculty,
            created_at: Utc::now(),
        }
    }

    /// Apply a partial update in place. The faculty reference, when present,
    /// is validated upstream.
    pub fn apply_update(&mut self, update: &AcademicDepartmentUpdate) {
        if let Some(value) = &update.title {
            self.title = value.clone();
        }
        if let Some(value) = update.academic_faculty {
            self.academic_faculty = value;
        }
    }
}

/// Department with its faculty reference resolved to the full document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulatedDepartment {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    /// Resolved faculty document; `None` when the reference is dangling.
    pub academic_faculty: Option<AcademicFaculty>,
    pub created_at: DateTime<Utc>,
}

impl PopulatedDepartment {
    /// Attach the resolved faculty to a raw department document.
    #[must_use]
    pub fn new(department: AcademicDepartment, faculty: Option<AcademicFaculty>) -> Self {
        Self {
            id: department.id,
            title: department.title,
            academic_faculty: faculty,
            created_at: department.created_at,
        }
    }
}

/// Partial update payload for an academic department.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AcademicDepartmentUpdate {
    pub title: Option<String>,
    pub academic_faculty: Option<Uuid>,
}
