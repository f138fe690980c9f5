// src/api/schemas.rs
//! Envelope shapes as they appear in the OpenAPI document.
use serde::Serialize;
use utoipa::ToSchema;

/// Standard success envelope
#[derive(Serialize, ToSchema)]
#[serde(bound = "T: Serialize")]
pub struct SuccessResponse<T> {
    /// Always true for successful responses
    #[schema(example = true)]
    pub success: bool,
    /// HTTP status mirrored in the body
    #[schema(example = 200)]
    pub status: u16,
    #[schema(example = "Fetched successfully")]
    pub message: String,
    /// Response data
    pub data: T,
}

/// `meta` block of list endpoints
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageMetaSchema {
    #[schema(example = 2)]
    pub page: u64,
    #[schema(example = 10)]
    pub limit: u64,
    #[schema(example = 35)]
    pub total: u64,
    #[schema(example = 4)]
    pub total_pages: u64,
}

/// Standard error envelope
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Always false for error responses
    #[schema(example = false)]
    pub success: bool,
    #[schema(example = 404)]
    pub status: u16,
    /// Human-readable error message
    #[schema(example = "Track not found")]
    pub message: String,
    /// Error code for programmatic handling
    #[schema(example = "TRACK_NOT_FOUND")]
    pub error: String,
}
