//! Student endpoints, keyed by the sequence-derived external id.
//!
//! ```text
//! GET /api/v1/students
//! GET|PATCH|DELETE /api/v1/students/{id}
//! ```
//!
//! Creation happens through `/users/create-student`; there is no create
//! route here.

use actix_web::{HttpResponse, delete, get, patch, web};
use pagination::PaginationOptions;
use serde::Deserialize;

use crate::domain::ApiError;
use crate::domain::profile::{BloodGroup, Gender};
use crate::domain::student::StudentUpdate;
use crate::domain::student_service::StudentFilters;
use crate::inbound::http::ApiResult;
use crate::inbound::http::response;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::{GuardianPayload, LocalGuardianPayload, NamePayload};
use crate::inbound::http::validation::{FieldErrors, optional_enum, optional_string};

/// Body of `PATCH /students/{id}`.
///
/// `email` is deserialised but never applied; the service answers 401 when
/// it is present. Nested subdocuments replace the stored value wholesale, so
/// their required fields apply when the subdocument is present.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStudentRequest {
    pub name: Option<NamePayload>,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub blood_group: Option<String>,
    pub email: Option<String>,
    pub contact_no: Option<String>,
    pub emergency_contact_no: Option<String>,
    pub present_address: Option<String>,
    pub permanent_address: Option<String>,
    pub guardian: Option<GuardianPayload>,
    pub local_guardian: Option<LocalGuardianPayload>,
    pub profile_image: Option<String>,
}

impl UpdateStudentRequest {
    fn validate(self) -> Result<StudentUpdate, ApiError> {
        let mut errors = FieldErrors::new();
        let name = self.name.and_then(|name| name.validate(&mut errors));
        let gender = optional_enum(
            &mut errors,
            "gender",
            self.gender,
            Gender::parse,
            "Invalid gender",
        );
        let blood_group = optional_enum(
            &mut errors,
            "bloodGroup",
            self.blood_group,
            BloodGroup::parse,
            "Invalid blood group",
        );
        let guardian = self
            .guardian
            .and_then(|guardian| guardian.validate(&mut errors));
        let local_guardian = self
            .local_guardian
            .and_then(|local| local.validate(&mut errors));
        errors.finish()?;

        Ok(StudentUpdate {
            name,
            gender,
            date_of_birth: optional_string(self.date_of_birth),
            email: optional_string(self.email),
            contact_no: optional_string(self.contact_no),
            emergency_contact_no: optional_string(self.emergency_contact_no),
            blood_group,
            present_address: optional_string(self.present_address),
            permanent_address: optional_string(self.permanent_address),
            guardian,
            local_guardian,
            profile_image: optional_string(self.profile_image),
        })
    }
}

/// Query accepted by the listing endpoint.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentListQuery {
    pub search_term: Option<String>,
    pub id: Option<String>,
    pub blood_group: Option<String>,
    pub email: Option<String>,
    pub contact_no: Option<String>,
    pub emergency_contact_no: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

impl StudentListQuery {
    fn into_parts(self) -> (StudentFilters, PaginationOptions) {
        (
            StudentFilters {
                search_term: self.search_term,
                id: self.id,
                blood_group: self.blood_group,
                email: self.email,
                contact_no: self.contact_no,
                emergency_contact_no: self.emergency_contact_no,
            },
            PaginationOptions {
                page: self.page,
                limit: self.limit,
                sort_by: self.sort_by,
                sort_order: self.sort_order,
            },
        )
    }
}

#[get("/students")]
pub async fn list_students(
    state: web::Data<HttpState>,
    query: web::Query<StudentListQuery>,
) -> ApiResult<HttpResponse> {
    let (filters, options) = query.into_inner().into_parts();
    let (data, meta) = state.students.list(filters, &options).await?;
    if data.is_empty() {
        return Ok(response::not_found("We couldn't find any students"));
    }
    Ok(response::list("Students information found", data, meta))
}

#[get("/students/{id}")]
pub async fn get_student(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    match state.students.get(&path).await? {
        Some(data) => Ok(response::ok("Student information found", data)),
        None => Ok(response::not_found(
            "We couldn't find the student you are looking for",
        )),
    }
}

#[patch("/students/{id}")]
pub async fn update_student(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateStudentRequest>,
) -> ApiResult<HttpResponse> {
    let update = payload.into_inner().validate()?;
    match state.students.update(&path, update).await? {
        Some(data) => Ok(response::ok(
            "Student information updated successfully",
            data,
        )),
        None => Ok(response::not_found(
            "We couldn't find the student you want to update",
        )),
    }
}

#[delete("/students/{id}")]
pub async fn delete_student(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    match state.students.delete(&path).await? {
        Some(data) => Ok(response::ok("Student deleted successfully", data)),
        None => Ok(response::not_found(
            "We couldn't find the student you want to delete",
        )),
    }
}
