//! Faculty-member endpoints, the mirror of the student surface.
//!
//! ```text
//! GET /api/v1/faculty-members
//! GET|PATCH|DELETE /api/v1/faculty-members/{id}
//! ```
//!
//! Creation happens through `/users/create-faculty`.

use actix_web::{HttpResponse, delete, get, patch, web};
use pagination::PaginationOptions;
use serde::Deserialize;

use crate::domain::ApiError;
use crate::domain::faculty_member::FacultyMemberUpdate;
use crate::domain::faculty_member_service::FacultyMemberFilters;
use crate::domain::profile::{BloodGroup, Gender};
use crate::inbound::http::ApiResult;
use crate::inbound::http::response;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::NamePayload;
use crate::inbound::http::validation::{FieldErrors, optional_enum, optional_string};

/// Body of `PATCH /faculty-members/{id}`.
///
/// Same rules as the student update: `email` is never applied, and a present
/// `name` replaces the stored subdocument wholesale.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFacultyMemberRequest {
    pub name: Option<NamePayload>,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub blood_group: Option<String>,
    pub email: Option<String>,
    pub contact_no: Option<String>,
    pub emergency_contact_no: Option<String>,
    pub present_address: Option<String>,
    pub permanent_address: Option<String>,
    pub designation: Option<String>,
    pub profile_image: Option<String>,
}

impl UpdateFacultyMemberRequest {
    fn validate(self) -> Result<FacultyMemberUpdate, ApiError> {
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
        errors.finish()?;

        Ok(FacultyMemberUpdate {
            name,
            gender,
            date_of_birth: optional_string(self.date_of_birth),
            email: optional_string(self.email),
            contact_no: optional_string(self.contact_no),
            emergency_contact_no: optional_string(self.emergency_contact_no),
            blood_group,
            present_address: optional_string(self.present_address),
            permanent_address: optional_string(self.permanent_address),
            designation: optional_string(self.designation),
            profile_image: optional_string(self.profile_image),
        })
    }
}

/// Query accepted by the listing endpoint.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacultyMemberListQuery {
    pub search_term: Option<String>,
    pub id: Option<String>,
    pub blood_group: Option<String>,
    pub email: Option<String>,
    pub contact_no: Option<String>,
    pub emergency_contact_no: Option<String>,
    pub designation: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

impl FacultyMemberListQuery {
    fn into_parts(self) -> (FacultyMemberFilters, PaginationOptions) {
        (
            FacultyMemberFilters {
                search_term: self.search_term,
                id: self.id,
                blood_group: self.blood_group,
                email: self.email,
                contact_no: self.contact_no,
                emergency_contact_no: self.emergency_contact_no,
                designation: self.designation,
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

#[get("/faculty-members")]
pub async fn list_faculty_members(
    state: web::Data<HttpState>,
    query: web::Query<FacultyMemberListQuery>,
) -> ApiResult<HttpResponse> {
    let (filters, options) = query.into_inner().into_parts();
    let (data, meta) = state.faculty_members.list(filters, &options).await?;
    if data.is_empty() {
        return Ok(response::not_found("We couldn't find any faculty members"));
    }
    Ok(response::list(
        "Faculty members information found",
        data,
        meta,
    ))
}

#[get("/faculty-members/{id}")]
pub async fn get_faculty_member(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    match state.faculty_members.get(&path).await? {
        Some(data) => Ok(response::ok("Faculty member information found", data)),
        None => Ok(response::not_found(
            "We couldn't find the faculty member you are looking for",
        )),
    }
}

#[patch("/faculty-members/{id}")]
pub async fn update_faculty_member(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateFacultyMemberRequest>,
) -> ApiResult<HttpResponse> {
    let update = payload.into_inner().validate()?;
    match state.faculty_members.update(&path, update).await? {
        Some(data) => Ok(response::ok(
            "Faculty member information updated successfully",
            data,
        )),
        None => Ok(response::not_found(
            "We couldn't find the faculty member you want to update",
        )),
    }
}

#[delete("/faculty-members/{id}")]
pub async fn delete_faculty_member(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    match state.faculty_members.delete(&path).await? {
        Some(data) => Ok(response::ok("Faculty member deleted successfully", data)),
        None => Ok(response::not_found(
            "We couldn't find the faculty member you want to delete",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use serde_json::{Value, json};

    use crate::domain::faculty_member::FacultyMemberDraft;
    use crate::domain::ports::UserRepository;
    use crate::inbound::http::test_utils::{memory_state, memory_state_with_store};

    fn test_app(
        state: web::Data<HttpState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(state)
            .service(list_faculty_members)
            .service(get_faculty_member)
            .service(update_faculty_member)
            .service(delete_faculty_member)
    }

    async fn onboard_faculty_member(state: &web::Data<HttpState>, email: &str) -> String {
        let draft = FacultyMemberDraft {
            name: crate::domain::profile::Name {
                first_name: "Grace".to_owned(),
                middle_name: None,
                last_name: "Hopper".to_owned(),
            },
            gender: crate::domain::profile::Gender::Female,
            date_of_birth: "1906-12-09".to_owned(),
            email: email.to_owned(),
            contact_no: format!("ln-{email}"),
            emergency_contact_no: "0172000001".to_owned(),
            blood_group: None,
            present_address: "1 Compiler Court".to_owned(),
            permanent_address: "1 Compiler Court".to_owned(),
            designation: "Lecturer".to_owned(),
            profile_image: None,
            academic_department: uuid::Uuid::new_v4(),
            academic_faculty: uuid::Uuid::new_v4(),
        };
        state
            .onboarding
            .create_faculty(draft, None)
            .await
            .expect("onboarding succeeds")
            .expect("read-back present")
            .id
    }

    #[actix_rt::test]
    async fn listing_filters_by_designation() {
        let state = memory_state();
        onboard_faculty_member(&state, "grace@example.com").await;
        let app = actix_test::init_service(test_app(state)).await;

        let request = actix_test::TestRequest::get()
            .uri("/faculty-members?designation=Lecturer")
            .to_request();
        let body: Value = actix_test::call_and_read_body_json(&app, request).await;
        assert_eq!(body["meta"]["total"], json!(1));
        assert_eq!(body["data"][0]["id"], json!("F-00001"));

        let request = actix_test::TestRequest::get()
            .uri("/faculty-members?designation=Professor")
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[actix_rt::test]
    async fn designation_updates_apply_and_email_stays_frozen() {
        let state = memory_state();
        let id = onboard_faculty_member(&state, "grace@example.com").await;
        let app = actix_test::init_service(test_app(state)).await;

        let request = actix_test::TestRequest::patch()
            .uri(&format!("/faculty-members/{id}"))
            .set_json(json!({"designation": "Professor"}))
            .to_request();
        let body: Value = actix_test::call_and_read_body_json(&app, request).await;
        assert_eq!(body["data"]["designation"], json!("Professor"));

        let request = actix_test::TestRequest::patch()
            .uri(&format!("/faculty-members/{id}"))
            .set_json(json!({"email": "new@example.com"}))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_rt::test]
    async fn delete_removes_member_and_credential() {
        let (state, store) = memory_state_with_store();
        let id = onboard_faculty_member(&state, "grace@example.com").await;
        let app = actix_test::init_service(test_app(state.clone())).await;

        let request = actix_test::TestRequest::delete()
            .uri(&format!("/faculty-members/{id}"))
            .to_request();
        let body: Value = actix_test::call_and_read_body_json(&app, request).await;
        assert_eq!(
            body["message"],
            json!("Faculty member deleted successfully")
        );

        let request = actix_test::TestRequest::get()
            .uri(&format!("/faculty-members/{id}"))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let credential = UserRepository::find_with_profile(store.as_ref(), &id)
            .await
            .expect("credential lookup succeeds");
        assert!(credential.is_none());
    }
}
