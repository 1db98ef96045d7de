//! Student profile entity, its populated projection, and update payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::academic_department::AcademicDepartment;
use super::academic_faculty::AcademicFaculty;
use super::profile::{BloodGroup, Gender, Guardian, LocalGuardian, Name};
use super::semester::AcademicSemester;

/// Fields eligible for free-text search on student listings.
pub const STUDENT_SEARCHABLE_FIELDS: &[&str] = &[
    "id",
    "email",
    "contactNo",
    "name.firstName",
    "name.middleName",
    "name.lastName",
];

/// Non-reference fields of a student profile.
///
/// Kept separate from the references so the populated projection can flatten
/// the same fields without duplicating them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    /// Store-generated identifier.
    #[serde(rename = "_id")]
    pub record_id: Uuid,
    /// Sequence-derived external identifier, shared with the owning user.
    pub id: String,
    pub name: Name,
    pub gender: Gender,
    pub date_of_birth: String,
    /// Globally unique across students; immutable after creation.
    pub email: String,
    /// Globally unique across students.
    pub contact_no: String,
    pub emergency_contact_no: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_group: Option<BloodGroup>,
    pub present_address: String,
    pub permanent_address: String,
    pub guardian: Guardian,
    pub local_guardian: LocalGuardian,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Persisted student document: profile fields plus academic references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(flatten)]
    pub profile: StudentProfile,
    pub academic_semester: Uuid,
    pub academic_department: Uuid,
    pub academic_faculty: Uuid,
}

/// Student with academic references resolved to full documents.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulatedStudent {
    #[serde(flatten)]
    pub profile: StudentProfile,
    pub academic_semester: Option<AcademicSemester>,
    pub academic_department: Option<AcademicDepartment>,
    pub academic_faculty: Option<AcademicFaculty>,
}

/// Validated onboarding payload, before identifiers are assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentDraft {
    pub name: Name,
    pub gender: Gender,
    pub date_of_birth: String,
    pub email: String,
    pub contact_no: String,
    pub emergency_contact_no: String,
    pub blood_group: Option<BloodGroup>,
    pub present_address: String,
    pub permanent_address: String,
    pub guardian: Guardian,
    pub local_guardian: LocalGuardian,
    pub profile_image: Option<String>,
    pub academic_semester: Uuid,
    pub academic_department: Uuid,
    pub academic_faculty: Uuid,
}

impl StudentDraft {
    /// Materialise a persistable document once the external id is known.
    #[must_use]
    pub fn materialise(&self, external_id: String) -> Student {
        Student {
            profile: StudentProfile {
                record_id: Uuid::new_v4(),
                id: external_id,
                name: self.name.clone(),
                gender: self.gender,
                date_of_birth: self.date_of_birth.clone(),
                email: self.email.clone(),
                contact_no: self.contact_no.clone(),
                emergency_contact_no: self.emergency_contact_no.clone(),
                blood_group: self.blood_group,
                present_address: self.present_address.clone(),
                permanent_address: self.permanent_address.clone(),
                guardian: self.guardian.clone(),
                local_guardian: self.local_guardian.clone(),
                profile_image: self.profile_image.clone(),
                created_at: Utc::now(),
            },
            academic_semester: self.academic_semester,
            academic_department: self.academic_department,
            academic_faculty: self.academic_faculty,
        }
    }
}

/// Partial update payload for a student profile.
///
/// `email` is carried so the write path can reject any attempt to mutate it;
/// it is never applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentUpdate {
    pub name: Option<Name>,
    pub gender: Option<Gender>,
    pub date_of_birth: Option<String>,
    pub email: Option<String>,
    pub contact_no: Option<String>,
    pub emergency_contact_no: Option<String>,
    pub blood_group: Option<BloodGroup>,
    pub present_address: Option<String>,
    pub permanent_address: Option<String>,
    pub guardian: Option<Guardian>,
    pub local_guardian: Option<LocalGuardian>,
    pub profile_image: Option<String>,
}

impl Student {
    /// Apply a partial update in place. The email field is intentionally
    /// ignored here; the service rejects updates that carry it.
    pub fn apply_update(&mut self, update: &StudentUpdate) {
        let StudentUpdate {
            name,
            gender,
            date_of_birth,
            email: _,
            contact_no,
            emergency_contact_no,
            blood_group,
            present_address,
            permanent_address,
            guardian,
            local_guardian,
            profile_image,
        } = update;

        let profile = &mut self.profile;
        if let Some(value) = name {
            profile.name = value.clone();
        }
        if let Some(value) = gender {
            profile.gender = *value;
        }
        if let Some(value) = date_of_birth {
            profile.date_of_birth = value.clone();
        }
        if let Some(value) = contact_no {
            profile.contact_no = value.clone();
        }
        if let Some(value) = emergency_contact_no {
            profile.emergency_contact_no = value.clone();
        }
        if let Some(value) = blood_group {
            profile.blood_group = Some(*value);
        }
        if let Some(value) = present_address {
            profile.present_address = value.clone();
        }
        if let Some(value) = permanent_address {
            profile.permanent_address = value.clone();
        }
        if let Some(value) = guardian {
            profile.guardian = value.clone();
        }
        if let Some(value) = local_guardian {
            profile.local_guardian = value.clone();
        }
        if let Some(value) = profile_image {
            profile.profile_image = Some(value.clone());
        }
    }
}
