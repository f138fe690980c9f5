use crate::api::schemas::ErrorResponse;
use crate::auth::adapter::incoming::web::extractors::auth::StaffUser;
use crate::shared::api::ApiResponse;
use crate::tracking::application::domain::entities::TrackStatus;
use crate::tracking::application::ports::incoming::use_cases::{CreateTrack, CreateTrackError};
use crate::AppState;
use actix_web::{post, web, Responder};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateTrackDto {
    pub order_id: String,
    #[schema(value_type = Option<String>, example = "created")]
    pub status: Option<TrackStatus>,
    /// Taken from the order when omitted.
    pub track_id: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
}

/// Open a track for an order (admin or moderator)
#[utoipa::path(
    post,
    path = "/api/tracks",
    tag = "tracking",
    security(("bearer_auth" = [])),
    request_body = CreateTrackDto,
    responses(
        (status = 201, description = "Track created with its initial step"),
        (status = 400, description = "Malformed order id or body", body = ErrorResponse),
        (status = 403, description = "Caller is not staff", body = ErrorResponse),
        (status = 409, description = "Track id already exists", body = ErrorResponse),
    )
)]
#[post("/api/tracks")]
pub async fn create_track_handler(
    staff: StaffUser,
    body: web::Json<CreateTrackDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = body.into_inner();

    let order_id = match Uuid::parse_str(dto.order_id.trim()) {
        Ok(id) => id,
        Err(_) => return ApiResponse::bad_request("INVALID_ID", "Invalid order id"),
    };

    let request = CreateTrack {
        order_id,
        status: dto.status,
        track_id: dto.track_id,
        location: dto.location,
        description: dto.description,
    };

    match data.tracking.create.execute(staff.user_id, request).await {
        Ok(track) => ApiResponse::created("Track created", track),
        Err(CreateTrackError::DuplicateTrackId) => {
            ApiResponse::conflict("TRACK_EXISTS", "A track with this id already exists")
        }
        Err(e) => {
            tracing::error!(order_id = %order_id, error = %e, "Track creation failed");
            ApiResponse::internal_error()
        }
    }
}
