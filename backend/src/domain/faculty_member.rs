//! Faculty-member profile entity, its populated projection, and update payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::academic_department::AcademicDepartment;
use super::academic_faculty::AcademicFaculty;
use super::profile::{BloodGroup, Gender, Name};

/// Fields eligible for free-text search on faculty-member listings.
pub const FACULTY_MEMBER_SEARCHABLE_FIELDS: &[&str] = &[
    "id",
    "email",
    "contactNo",
    "designation",
    "name.firstName",
    "name.middleName",
    "name.lastName",
];

/// Non-reference fields of a faculty-member profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacultyMemberProfile {
    /// Store-generated identifier.
    #[serde(rename = "_id")]
    pub record_id: Uuid,
    /// Sequence-derived external identifier, shared with the owning user.
    pub id: String,
    pub name: Name,
    pub gender: Gender,
    pub date_of_birth: String,
    /// Globally unique across faculty members; immutable after creation.
    pub email: String,
    /// Globally unique across faculty members.
    pub contact_no: String,
    pub emergency_contact_no: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_group: Option<BloodGroup>,
    pub present_address: String,
    pub permanent_address: String,
    pub designation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Persisted faculty-member document: profile fields plus academic references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacultyMember {
    #[serde(flatten)]
    pub profile: FacultyMemberProfile,
    pub academic_department: Uuid,
    pub academic_faculty: Uuid,
}

/// Faculty member with academic references resolved to full documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulatedFacultyMember {
    #[serde(flatten)]
    pub profile: FacultyMemberProfile,
    pub academic_department: Option<AcademicDepartment>,
    pub academic_faculty: Option<AcademicFaculty>,
}

/// Validated onboarding payload, before identifiers are assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacultyMemberDraft {
    pub name: Name,
    pub gender: Gender,
    pub date_of_birth: String,
    pub email: String,
    pub contact_no: String,
    pub emergency_contact_no: String,
    pub blood_group: Option<BloodGroup>,
    pub present_address: String,
    pub permanent_address: String,
    pub designation: String,
    pub profile_image: Option<String>,
    pub academic_department: Uuid,
    pub academic_faculty: Uuid,
}

impl FacultyMemberDraft {
    /// Materialise a persistable document once the external id is known.
    #[must_use]
    pub fn materialise(&self, external_id: String) -> FacultyMember {
        FacultyMember {
            profile: FacultyMemberProfile {
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
                designation: self.designation.clone(),
                profile_image: self.profile_image.clone(),
                created_at: Utc::now(),
            },
            academic_department: self.academic_department,
            academic_faculty: self.academic_faculty,
        }
    }
}

/// Partial update payload for a faculty-member profile.
///
/// `email` is carried so the write path can reject any attempt to mutate it;
/// it is never applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacultyMemberUpdate {
    pub name: Option<Name>,
    pub gender: Option<Gender>,
    pub date_of_birth: Option<String>,
    pub email: Option<String>,
    pub contact_no: Option<String>,
    pub emergency_contact_no: Option<String>,
    pub blood_group: Option<BloodGroup>,
    pub present_address: Option<String>,
    pub permanent_address: Option<String>,
    pub designation: Option<String>,
    pub profile_image: Option<String>,
}

impl FacultyMember {
    /// Apply a partial update in place. Email mutation is rejected upstream.
    pub fn apply_update(&mut self, update: &FacultyMemberUpdate) {
        let FacultyMemberUpdate {
            name,
            gender,
            date_of_birth,
            email: _,
            contact_no,
            emergency_contact_no,
            blood_group,
            present_address,
            permanent_address,
            designation,
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
        if let Some(value) = designation {
            profile.designation = value.clone();
        }
        if let Some(value) = profile_image {
            profile.profile_image = Some(value.clone());
        }
    }
}
