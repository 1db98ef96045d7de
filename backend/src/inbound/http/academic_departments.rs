//! Academic department endpoints.
//!
//! ```text
//! POST /api/v1/academic-departments/create-department
//! GET /api/v1/academic-departments
//! GET|PATCH|DELETE /api/v1/academic-departments/{id}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};
use pagination::PaginationOptions;
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::ApiError;
use crate::domain::academic_department::AcademicDepartmentUpdate;
use crate::domain::academic_department_service::AcademicDepartmentFilters;
use crate::inbound::http::ApiResult;
use crate::inbound::http::response;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldErrors, optional_string, parse_record_id, required_reference, required_string,
};

/// Body of `POST /academic-departments/create-department`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAcademicDepartmentRequest {
    pub title: Option<String>,
    pub academic_faculty: Option<String>,
}

impl CreateAcademicDepartmentRequest {
    fn validate(self) -> Result<(String, Uuid), ApiError> {
        let mut errors = FieldErrors::new();
        let title = required_string(
            &mut errors,
            "title",
            self.title,
            "Department title is required",
        );
        let faculty = required_reference(
            &mut errors,
            "academicFaculty",
            self.academic_faculty,
            "Department faculty is required",
            "Invalid academic faculty",
        );
        errors.finish()?;
        match (title, faculty) {
            (Some(title), Some(faculty)) => Ok((title, faculty)),
            _ => Err(ApiError::Unknown),
        }
    }
}

/// Body of `PATCH /academic-departments/{id}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAcademicDepartmentRequest {
    pub title: Option<String>,
    pub academic_faculty: Option<String>,
}

impl UpdateAcademicDepartmentRequest {
    fn validate(self) -> Result<AcademicDepartmentUpdate, ApiError> {
        let mut errors = FieldErrors::new();
        let academic_faculty = match optional_string(self.academic_faculty) {
            Some(raw) => {
                let parsed = Uuid::parse_str(&raw).ok();
                if parsed.is_none() {
                    errors.push("academicFaculty", "Invalid academic faculty");
                }
                parsed
            }
            None => None,
        };
        errors.finish()?;
        Ok(AcademicDepartmentUpdate {
            title: optional_string(self.title),
            academic_faculty,
        })
    }
}

/// Query accepted by the listing endpoint.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicDepartmentListQuery {
    pub search_term: Option<String>,
    pub title: Option<String>,
    pub academic_faculty: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

impl AcademicDepartmentListQuery {
    fn into_parts(self) -> (AcademicDepartmentFilters, PaginationOptions) {
        (
            AcademicDepartmentFilters {
                search_term: self.search_term,
                title: self.title,
                academic_faculty: self.academic_faculty,
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

#[post("/academic-departments/create-department")]
pub async fn create_academic_department(
    state: web::Data<HttpState>,
    payload: web::Json<CreateAcademicDepartmentRequest>,
) -> ApiResult<HttpResponse> {
    let (title, academic_faculty) = payload.into_inner().validate()?;
    let data = state
        .academic_departments
        .create(title, academic_faculty)
        .await?;
    Ok(response::created("Department created successfully", data))
}

#[get("/academic-departments")]
pub async fn list_academic_departments(
    state: web::Data<HttpState>,
    query: web::Query<AcademicDepartmentListQuery>,
) -> ApiResult<HttpResponse> {
    let (filters, options) = query.into_inner().into_parts();
    let (data, meta) = state.academic_departments.list(filters, &options).await?;
    if data.is_empty() {
        return Ok(response::not_found(
            "We couldn't find any academic departments",
        ));
    }
    Ok(response::list(
        "Academics departments information found",
        data,
        meta,
    ))
}

#[get("/academic-departments/{id}")]
pub async fn get_academic_department(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_record_id(&path)?;
    match state.academic_departments.get(id).await? {
        Some(data) => Ok(response::ok("Department information found", data)),
        None => Ok(response::not_found(
            "We couldn't find the department you are looking for",
        )),
    }
}

#[patch("/academic-departments/{id}")]
pub async fn update_academic_department(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateAcademicDepartmentRequest>,
) -> ApiResult<HttpResponse> {
    let id = parse_record_id(&path)?;
    let update = payload.into_inner().validate()?;
    match state.academic_departments.update(id, update).await? {
        Some(data) => Ok(response::ok(
            "Academic department information updated successfully",
            data,
        )),
        None => Ok(response::not_found(
            "We couldn't find the academic department you want to update",
        )),
    }
}

#[delete("/academic-departments/{id}")]
pub async fn delete_academic_department(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_record_id(&path)?;
    match state.academic_departments.delete(id).await? {
        Some(data) => Ok(response::ok("Department deleted successfully", data)),
        None => Ok(response::not_found(
            "We couldn't find the department you want to delete",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use serde_json::{Value, json};

    use crate::inbound::http::error::ErrorEnvelope;
    use crate::inbound::http::test_utils::memory_state;

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
            .service(create_academic_department)
            .service(list_academic_departments)
            .service(get_academic_department)
            .service(update_academic_department)
            .service(delete_academic_department)
    }

    async fn seed_faculty(state: &web::Data<HttpState>, title: &str) -> String {
        let faculty = state
            .academic_faculties
            .create(title.to_owned())
            .await
            .expect("faculty seeds");
        faculty.id.to_string()
    }

    #[actix_rt::test]
    async fn create_populates_the_faculty_reference() {
        let state = memory_state();
        let faculty_id = seed_faculty(&state, "Faculty of Science").await;
        let app = actix_test::init_service(test_app(state)).await;

        let request = actix_test::TestRequest::post()
            .uri("/academic-departments/create-department")
            .set_json(json!({"title": "Physics", "academicFaculty": faculty_id}))
            .to_request();
        let created: Value = actix_test::call_and_read_body_json(&app, request).await;
        assert_eq!(created["statusCode"], json!(201));
        assert_eq!(
            created["data"]["academicFaculty"]["title"],
            json!("Faculty of Science")
        );
    }

    #[actix_rt::test]
    async fn create_with_unknown_faculty_is_not_found() {
        let app = actix_test::init_service(test_app(memory_state())).await;

        let request = actix_test::TestRequest::post()
            .uri("/academic-departments/create-department")
            .set_json(json!({
                "title": "Physics",
                "academicFaculty": uuid::Uuid::new_v4().to_string(),
            }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let envelope: ErrorEnvelope = actix_test::read_body_json(response).await;
        assert_eq!(envelope.message, "Academic faculty not found");
    }

    #[actix_rt::test]
    async fn missing_fields_collect_schema_messages() {
        let app = actix_test::init_service(test_app(memory_state())).await;

        let request = actix_test::TestRequest::post()
            .uri("/academic-departments/create-department")
            .set_json(json!({}))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let envelope: ErrorEnvelope = actix_test::read_body_json(response).await;
        let messages: Vec<&str> = envelope
            .error_messages
            .iter()
            .map(|m| m.message.as_str())
            .collect();
        assert!(messages.contains(&"Department title is required"));
        assert!(messages.contains(&"Department faculty is required"));
    }

    #[actix_rt::test]
    async fn listing_filters_by_faculty_reference() {
        let state = memory_state();
        let science = seed_faculty(&state, "Faculty of Science").await;
        let arts = seed_faculty(&state, "Faculty of Arts").await;
        let app = actix_test::init_service(test_app(state)).await;

        for (title, faculty) in [("Physics", &science), ("History", &arts)] {
            let request = actix_test::TestRequest::post()
                .uri("/academic-departments/create-department")
                .set_json(json!({"title": title, "academicFaculty": faculty}))
                .to_request();
            let response = actix_test::call_service(&app, request).await;
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let request = actix_test::TestRequest::get()
            .uri(&format!("/academic-departments?academicFaculty={science}"))
            .to_request();
        let body: Value = actix_test::call_and_read_body_json(&app, request).await;
        assert_eq!(body["meta"]["total"], json!(1));
        assert_eq!(body["data"][0]["title"], json!("Physics"));
    }

    #[actix_rt::test]
    async fn update_and_delete_round_trip() {
        let state = memory_state();
        let faculty_id = seed_faculty(&state, "Faculty of Science").await;
        let app = actix_test::init_service(test_app(state)).await;

        let request = actix_test::TestRequest::post()
            .uri("/academic-departments/create-department")
            .set_json(json!({"title": "Physics", "academicFaculty": faculty_id}))
            .to_request();
        let created: Value = actix_test::call_and_read_body_json(&app, request).await;
        let id = created["data"]["_id"].as_str().expect("id present").to_owned();

        let request = actix_test::TestRequest::patch()
            .uri(&format!("/academic-departments/{id}"))
            .set_json(json!({"title": "Applied Physics"}))
            .to_request();
        let updated: Value = actix_test::call_and_read_body_json(&app, request).await;
        assert_eq!(updated["data"]["title"], json!("Applied Physics"));

        let request = actix_test::TestRequest::delete()
            .uri(&format!("/academic-departments/{id}"))
            .to_request();
        let deleted: Value = actix_test::call_and_read_body_json(&app, request).await;
        assert_eq!(deleted["message"], json!("Department deleted successfully"));

        let request = actix_test::TestRequest::get()
            .uri(&format!("/academic-departments/{id}"))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
