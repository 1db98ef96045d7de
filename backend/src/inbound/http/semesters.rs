//! Academic semester endpoints.
//!
//! ```text
//! POST /api/v1/academic-semesters/create-semester
//! GET /api/v1/academic-semesters
//! GET|PATCH|DELETE /api/v1/academic-semesters/{id}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};
use pagination::PaginationOptions;
use serde::Deserialize;
use serde_json::Value;

use crate::domain::ApiError;
use crate::domain::semester::{Month, NewSemester, SemesterCode, SemesterTitle, SemesterUpdate};
use crate::domain::semester_service::SemesterFilters;
use crate::inbound::http::ApiResult;
use crate::inbound::http::response;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldErrors, optional_enum, parse_record_id, required_enum,
};

/// Body of `POST /academic-semesters/create-semester`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSemesterRequest {
    pub title: Option<String>,
    /// Kept loose so a non-numeric year reports a schema message instead of
    /// a deserialisation failure.
    pub year: Option<Value>,
    pub code: Option<String>,
    pub start_month: Option<String>,
    pub end_month: Option<String>,
}

fn validate_year(errors: &mut FieldErrors, year: Option<&Value>) -> Option<i32> {
    let Some(raw) = year else {
        errors.push("year", "Semester year is required");
        return None;
    };
    let Some(value) = raw.as_i64().and_then(|v| i32::try_from(v).ok()) else {
        errors.push("year", "Year must be a number");
        return None;
    };
    if !(crate::domain::semester::MIN_SEMESTER_YEAR..=crate::domain::semester::MAX_SEMESTER_YEAR)
        .contains(&value)
    {
        errors.push("year", "Semester year must be between 2023 and 2100");
        return None;
    }
    Some(value)
}

impl CreateSemesterRequest {
    fn validate(self) -> Result<NewSemester, ApiError> {
        let mut errors = FieldErrors::new();
        let title = required_enum(
            &mut errors,
            "title",
            self.title,
            SemesterTitle::parse,
            "Semester title is required",
            "Invalid semester title",
        );
        let year = validate_year(&mut errors, self.year.as_ref());
        let code = required_enum(
            &mut errors,
            "code",
            self.code,
            SemesterCode::parse,
            "Semester code is required",
            "Invalid semester code",
        );
        let start_month = required_enum(
            &mut errors,
            "startMonth",
            self.start_month,
            Month::parse,
            "Semester start month is required",
            "Invalid semester start month",
        );
        let end_month = required_enum(
            &mut errors,
            "endMonth",
            self.end_month,
            Month::parse,
            "Semester end month is required",
            "Invalid semester end month",
        );
        errors.finish()?;

        match (title, year, code, start_month, end_month) {
            (Some(title), Some(year), Some(code), Some(start_month), Some(end_month)) => {
                Ok(NewSemester {
                    title,
                    year,
                    code,
                    start_month,
                    end_month,
                })
            }
            _ => Err(ApiError::Unknown),
        }
    }
}

/// Body of `PATCH /academic-semesters/{id}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSemesterRequest {
    pub title: Option<String>,
    pub year: Option<Value>,
    pub code: Option<String>,
    pub start_month: Option<String>,
    pub end_month: Option<String>,
}

impl UpdateSemesterRequest {
    fn validate(self) -> Result<SemesterUpdate, ApiError> {
        let mut errors = FieldErrors::new();
        let title = optional_enum(
            &mut errors,
            "title",
            self.title,
            SemesterTitle::parse,
            "Invalid semester title",
        );
        let year = match self.year {
            Some(raw) => validate_year(&mut errors, Some(&raw)),
            None => None,
        };
        let code = optional_enum(
            &mut errors,
            "code",
            self.code,
            SemesterCode::parse,
            "Invalid semester code",
        );
        let start_month = optional_enum(
            &mut errors,
            "startMonth",
            self.start_month,
            Month::parse,
            "Invalid semester start month",
        );
        let end_month = optional_enum(
            &mut errors,
            "endMonth",
            self.end_month,
            Month::parse,
            "Invalid semester end month",
        );
        errors.finish()?;

        Ok(SemesterUpdate {
            title,
            year,
            code,
            start_month,
            end_month,
        })
    }
}

/// Query accepted by the listing endpoint.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemesterListQuery {
    pub search_term: Option<String>,
    pub title: Option<String>,
    pub code: Option<String>,
    pub year: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

impl SemesterListQuery {
    fn into_parts(self) -> (SemesterFilters, PaginationOptions) {
        (
            SemesterFilters {
                search_term: self.search_term,
                title: self.title,
                code: self.code,
                year: self.year,
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

#[post("/academic-semesters/create-semester")]
pub async fn create_semester(
    state: web::Data<HttpState>,
    payload: web::Json<CreateSemesterRequest>,
) -> ApiResult<HttpResponse> {
    let new_semester = payload.into_inner().validate()?;
    let data = state.semesters.create(new_semester).await?;
    Ok(response::created("Semester created successfully", data))
}

#[get("/academic-semesters")]
pub async fn list_semesters(
    state: web::Data<HttpState>,
    query: web::Query<SemesterListQuery>,
) -> ApiResult<HttpResponse> {
    let (filters, options) = query.into_inner().into_parts();
    let (data, meta) = state.semesters.list(filters, &options).await?;
    if data.is_empty() {
        return Ok(response::not_found("We couldn't find any semesters"));
    }
    Ok(response::list("Semesters information found", data, meta))
}

#[get("/academic-semesters/{id}")]
pub async fn get_semester(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_record_id(&path)?;
    match state.semesters.get(id).await? {
        Some(data) => Ok(response::ok("Semester information found", data)),
        None => Ok(response::not_found(
            "We couldn't find the semester you are looking for",
        )),
    }
}

#[patch("/academic-semesters/{id}")]
pub async fn update_semester(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateSemesterRequest>,
) -> ApiResult<HttpResponse> {
    let id = parse_record_id(&path)?;
    let update = payload.into_inner().validate()?;
    match state.semesters.update(id, update).await? {
        Some(data) => Ok(response::ok(
            "Semester information updated successfully",
            data,
        )),
        None => Ok(response::not_found(
            "We couldn't find the semester you want to update",
        )),
    }
}

#[delete("/academic-semesters/{id}")]
pub async fn delete_semester(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_record_id(&path)?;
    match state.semesters.delete(id).await? {
        Some(data) => Ok(response::ok("Semester deleted successfully", data)),
        None => Ok(response::not_found(
            "We couldn't find the semester you want to delete",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use serde_json::json;

    use crate::inbound::http::error::ErrorEnvelope;
    use crate::inbound::http::test_utils::{memory_state, semester_body};

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
            .service(create_semester)
            .service(list_semesters)
            .service(get_semester)
            .service(update_semester)
            .service(delete_semester)
    }

    #[actix_rt::test]
    async fn create_then_fetch_round_trips() {
        let app = actix_test::init_service(test_app(memory_state())).await;

        let request = actix_test::TestRequest::post()
            .uri("/academic-semesters/create-semester")
            .set_json(semester_body(2025))
            .to_request();
        let created: Value = actix_test::call_and_read_body_json(&app, request).await;
        assert_eq!(created["statusCode"], json!(201));
        assert_eq!(created["message"], json!("Semester created successfully"));
        let id = created["data"]["_id"].as_str().expect("id present").to_owned();

        let request = actix_test::TestRequest::get()
            .uri(&format!("/academic-semesters/{id}"))
            .to_request();
        let fetched: Value = actix_test::call_and_read_body_json(&app, request).await;
        assert_eq!(fetched["message"], json!("Semester information found"));
        assert_eq!(fetched["data"]["year"], json!(2025));
    }

    #[actix_rt::test]
    async fn missing_fields_collect_schema_messages() {
        let app = actix_test::init_service(test_app(memory_state())).await;

        let request = actix_test::TestRequest::post()
            .uri("/academic-semesters/create-semester")
            .set_json(json!({"year": "soon"}))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let envelope: ErrorEnvelope = actix_test::read_body_json(response).await;
        assert_eq!(envelope.message, "Validation Error");
        let paths: Vec<&str> = envelope
            .error_messages
            .iter()
            .map(|m| m.path.as_str())
            .collect();
        assert!(paths.contains(&"title"));
        assert!(paths.contains(&"year"));
        assert!(paths.contains(&"code"));
    }

    #[actix_rt::test]
    async fn out_of_range_year_is_rejected() {
        let app = actix_test::init_service(test_app(memory_state())).await;

        let mut body = semester_body(2025);
        body["year"] = json!(1999);
        let request = actix_test::TestRequest::post()
            .uri("/academic-semesters/create-semester")
            .set_json(body)
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let envelope: ErrorEnvelope = actix_test::read_body_json(response).await;
        assert_eq!(
            envelope.error_messages[0].message,
            "Semester year must be between 2023 and 2100"
        );
    }

    #[actix_rt::test]
    async fn mismatched_title_and_code_is_a_bad_request() {
        let app = actix_test::init_service(test_app(memory_state())).await;

        let mut body = semester_body(2025);
        body["code"] = json!("02");
        let request = actix_test::TestRequest::post()
            .uri("/academic-semesters/create-semester")
            .set_json(body)
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let envelope: ErrorEnvelope = actix_test::read_body_json(response).await;
        assert_eq!(envelope.message, "Invalid semester code");
    }

    #[actix_rt::test]
    async fn duplicate_slot_answers_conflict() {
        let app = actix_test::init_service(test_app(memory_state())).await;

        let request = actix_test::TestRequest::post()
            .uri("/academic-semesters/create-semester")
            .set_json(semester_body(2025))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let request = actix_test::TestRequest::post()
            .uri("/academic-semesters/create-semester")
            .set_json(semester_body(2025))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let envelope: ErrorEnvelope = actix_test::read_body_json(response).await;
        assert_eq!(
            envelope.message,
            "Semester with the same title and year already exists."
        );
    }

    #[actix_rt::test]
    async fn empty_listing_is_a_soft_404() {
        let app = actix_test::init_service(test_app(memory_state())).await;

        let request = actix_test::TestRequest::get()
            .uri("/academic-semesters")
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["message"], json!("We couldn't find any semesters"));
        assert!(body["data"].is_null());
    }

    #[actix_rt::test]
    async fn listing_paginates_and_sorts() {
        let app = actix_test::init_service(test_app(memory_state())).await;

        for year in [2024, 2025, 2026] {
            let request = actix_test::TestRequest::post()
                .uri("/academic-semesters/create-semester")
                .set_json(semester_body(year))
                .to_request();
            let response = actix_test::call_service(&app, request).await;
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let request = actix_test::TestRequest::get()
            .uri("/academic-semesters?page=1&limit=2&sortBy=year&sortOrder=desc")
            .to_request();
        let body: Value = actix_test::call_and_read_body_json(&app, request).await;
        assert_eq!(body["meta"]["total"], json!(3));
        let years: Vec<i64> = body["data"]
            .as_array()
            .expect("data array")
            .iter()
            .filter_map(|d| d["year"].as_i64())
            .collect();
        assert_eq!(years, vec![2026, 2025]);
    }

    #[actix_rt::test]
    async fn malformed_id_is_a_cast_error() {
        let app = actix_test::init_service(test_app(memory_state())).await;

        let request = actix_test::TestRequest::get()
            .uri("/academic-semesters/not-a-uuid")
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let envelope: ErrorEnvelope = actix_test::read_body_json(response).await;
        assert_eq!(envelope.message, "Cast Error");
        assert_eq!(envelope.error_messages[0].path, "id");
    }

    #[actix_rt::test]
    async fn partial_update_of_half_the_title_code_pair_is_refused() {
        let app = actix_test::init_service(test_app(memory_state())).await;

        let request = actix_test::TestRequest::post()
            .uri("/academic-semesters/create-semester")
            .set_json(semester_body(2025))
            .to_request();
        let created: Value = actix_test::call_and_read_body_json(&app, request).await;
        let id = created["data"]["_id"].as_str().expect("id present").to_owned();

        let request = actix_test::TestRequest::patch()
            .uri(&format!("/academic-semesters/{id}"))
            .set_json(json!({"code": "02"}))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let request = actix_test::TestRequest::patch()
            .uri(&format!("/academic-semesters/{id}"))
            .set_json(json!({"year": 2030}))
            .to_request();
        let updated: Value = actix_test::call_and_read_body_json(&app, request).await;
        assert_eq!(updated["data"]["year"], json!(2030));
    }

    #[actix_rt::test]
    async fn delete_removes_the_semester() {
        let app = actix_test::init_service(test_app(memory_state())).await;

        let request = actix_test::TestRequest::post()
            .uri("/academic-semesters/create-semester")
            .set_json(semester_body(2025))
            .to_request();
        let created: Value = actix_test::call_and_read_body_json(&app, request).await;
        let id = created["data"]["_id"].as_str().expect("id present").to_owned();

        let request = actix_test::TestRequest::delete()
            .uri(&format!("/academic-semesters/{id}"))
            .to_request();
        let deleted: Value = actix_test::call_and_read_body_json(&app, request).await;
        assert_eq!(deleted["message"], json!("Semester deleted successfully"));

        let request = actix_test::TestRequest::delete()
            .uri(&format!("/academic-semesters/{id}"))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
