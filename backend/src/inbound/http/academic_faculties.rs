//! Academic faculty endpoints.
//!
//! ```text
//! POST /api/v1/academic-faculties/create-faculty
//! GET /api/v1/academic-faculties
//! GET|PATCH|DELETE /api/v1/academic-faculties/{id}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};
use pagination::PaginationOptions;
use serde::Deserialize;

use crate::domain::ApiError;
use crate::domain::academic_faculty::AcademicFacultyUpdate;
use crate::domain::academic_faculty_service::AcademicFacultyFilters;
use crate::inbound::http::ApiResult;
use crate::inbound::http::response;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldErrors, optional_string, parse_record_id, required_string,
};

/// Body of `POST /academic-faculties/create-faculty`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAcademicFacultyRequest {
    pub title: Option<String>,
}

impl CreateAcademicFacultyRequest {
    fn validate(self) -> Result<String, ApiError> {
        let mut errors = FieldErrors::new();
        let title = required_string(
            &mut errors,
            "title",
            self.title,
            "Academic faculty title is required",
        );
        errors.finish()?;
        title.ok_or(ApiError::Unknown)
    }
}

/// Body of `PATCH /academic-faculties/{id}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAcademicFacultyRequest {
    pub title: Option<String>,
}

impl UpdateAcademicFacultyRequest {
    fn validate(self) -> AcademicFacultyUpdate {
        AcademicFacultyUpdate {
            title: optional_string(self.title),
        }
    }
}

/// Query accepted by the listing endpoint.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicFacultyListQuery {
    pub search_term: Option<String>,
    pub title: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

impl AcademicFacultyListQuery {
    fn into_parts(self) -> (AcademicFacultyFilters, PaginationOptions) {
        (
            AcademicFacultyFilters {
                search_term: self.search_term,
                title: self.title,
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

#[post("/academic-faculties/create-faculty")]
pub async fn create_academic_faculty(
    state: web::Data<HttpState>,
    payload: web::Json<CreateAcademicFacultyRequest>,
) -> ApiResult<HttpResponse> {
    let title = payload.into_inner().validate()?;
    let data = state.academic_faculties.create(title).await?;
    Ok(response::created(
        "Academic faculty created successfully",
        data,
    ))
}

#[get("/academic-faculties")]
pub async fn list_academic_faculties(
    state: web::Data<HttpState>,
    query: web::Query<AcademicFacultyListQuery>,
) -> ApiResult<HttpResponse> {
    let (filters, options) = query.into_inner().into_parts();
    let (data, meta) = state.academic_faculties.list(filters, &options).await?;
    if data.is_empty() {
        return Ok(response::not_found(
            "We couldn't find any academic faculties",
        ));
    }
    Ok(response::list(
        "Academics faculties information found",
        data,
        meta,
    ))
}

#[get("/academic-faculties/{id}")]
pub async fn get_academic_faculty(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_record_id(&path)?;
    match state.academic_faculties.get(id).await? {
        Some(data) => Ok(response::ok("Academic faculty information found", data)),
        None => Ok(response::not_found(
            "We couldn't find the academic faculty you are looking for",
        )),
    }
}

#[patch("/academic-faculties/{id}")]
pub async fn update_academic_faculty(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateAcademicFacultyRequest>,
) -> ApiResult<HttpResponse> {
    let id = parse_record_id(&path)?;
    let update = payload.into_inner().validate();
    match state.academic_faculties.update(id, update).await? {
        Some(data) => Ok(response::ok(
            "Academic faculty information updated successfully",
            data,
        )),
        None => Ok(response::not_found(
            "We couldn't find the academic faculty you want to update",
        )),
    }
}

#[delete("/academic-faculties/{id}")]
pub async fn delete_academic_faculty(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_record_id(&path)?;
    match state.academic_faculties.delete(id).await? {
        Some(data) => Ok(response::ok("Academic faculty deleted successfully", data)),
        None => Ok(response::not_found(
            "We couldn't find the academic faculty you want to delete",
        )),
    }
}
