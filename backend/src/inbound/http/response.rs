//! Success envelope shared by every REST endpoint.
//!
//! All endpoints answer `{statusCode, success, message, data, meta?}`; `data`
//! is always present, `meta` only on listings.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use pagination::ListMeta;
use serde::Serialize;

/// Wire form of a successful (or soft-missing) response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T: Serialize> {
    pub status_code: u16,
    pub success: bool,
    pub message: &'static str,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ListMeta>,
}

fn render<T: Serialize>(status: StatusCode, body: ApiResponse<T>) -> HttpResponse {
    HttpResponse::build(status).json(body)
}

/// 200 with a single document.
pub fn ok<T: Serialize>(message: &'static str, data: T) -> HttpResponse {
    render(
        StatusCode::OK,
        ApiResponse {
            status_code: StatusCode::OK.as_u16(),
            success: true,
            message,
            data: Some(data),
            meta: None,
        },
    )
}

/// 201 with the created document.
pub fn created<T: Serialize>(message: &'static str, data: T) -> HttpResponse {
    render(
        StatusCode::CREATED,
        ApiResponse {
            status_code: StatusCode::CREATED.as_u16(),
            success: true,
            message,
            data: Some(data),
            meta: None,
        },
    )
}

/// 201 acknowledging a commit whose read-back produced nothing.
pub fn created_empty(message: &'static str) -> HttpResponse {
    render(
        StatusCode::CREATED,
        ApiResponse::<()> {
            status_code: StatusCode::CREATED.as_u16(),
            success: true,
            message,
            data: None,
            meta: None,
        },
    )
}

/// 200 with a page of documents and its pagination meta.
pub fn list<T: Serialize>(message: &'static str, data: Vec<T>, meta: ListMeta) -> HttpResponse {
    render(
        StatusCode::OK,
        ApiResponse {
            status_code: StatusCode::OK.as_u16(),
            success: true,
            message,
            data: Some(data),
            meta: Some(meta),
        },
    )
}

/// 404 for a lookup that produced nothing; still the success envelope, with
/// `success:false` and `data:null`.
pub fn not_found(message: &'static str) -> HttpResponse {
    render(
        StatusCode::NOT_FOUND,
        ApiResponse::<()> {
            status_code: StatusCode::NOT_FOUND.as_u16(),
            success: false,
            message,
            data: None,
            meta: None,
        },
    )
}
