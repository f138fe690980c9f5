// src/shared/api/response.rs
use actix_web::{http::StatusCode, HttpResponse};
use serde::Serialize;

use super::pagination::PageMeta;

/// Uniform response body returned by every handler.
///
/// `error` carries a machine-readable code such as `INVALID_CREDENTIALS`;
/// the human-readable text always lives in `message`.
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    fn build(
        status: StatusCode,
        message: &str,
        data: Option<T>,
        meta: Option<PageMeta>,
    ) -> HttpResponse {
        HttpResponse::build(status).json(ApiResponse {
            success: true,
            status: status.as_u16(),
            message: message.to_string(),
            data,
            meta,
            error: None,
        })
    }

    pub fn success(message: &str, data: T) -> HttpResponse {
        Self::build(StatusCode::OK, message, Some(data), None)
    }

    pub fn created(message: &str, data: T) -> HttpResponse {
        Self::build(StatusCode::CREATED, message, Some(data), None)
    }

    pub fn paginated(message: &str, data: T, meta: PageMeta) -> HttpResponse {
        Self::build(StatusCode::OK, message, Some(data), Some(meta))
    }
}

impl ApiResponse<()> {
    pub fn ok(message: &str) -> HttpResponse {
        Self::build(StatusCode::OK, message, None, None)
    }

    pub fn error(status: StatusCode, code: &str, message: &str) -> HttpResponse {
        HttpResponse::build(status).json(ApiResponse::<()> {
            success: false,
            status: status.as_u16(),
            message: message.to_string(),
            data: None,
            meta: None,
            error: Some(code.to_string()),
        })
    }

    pub fn not_found(code: &str, message: &str) -> HttpResponse {
        Self::error(StatusCode::NOT_FOUND, code, message)
    }

    pub fn bad_request(code: &str, message: &str) -> HttpResponse {
        Self::error(StatusCode::BAD_REQUEST, code, message)
    }

    pub fn forbidden(code: &str, message: &str) -> HttpResponse {
        Self::error(StatusCode::FORBIDDEN, code, message)
    }

    pub fn unauthorized(code: &str, message: &str) -> HttpResponse {
        Self::error(StatusCode::UNAUTHORIZED, code, message)
    }

    pub fn conflict(code: &str, message: &str) -> HttpResponse {
        Self::error(StatusCode::CONFLICT, code, message)
    }

    pub fn internal_error() -> HttpResponse {
        Self::error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            "An unexpected error occurred",
        )
    }
}
