use crate::api::schemas::ErrorResponse;
use crate::shared::api::ApiResponse;
use crate::tracking::application::ports::incoming::use_cases::GetTrackError;
use crate::AppState;
use actix_web::{get, web, Responder};

/// Public parcel tracking
#[utoipa::path(
    get,
    path = "/api/tracks/{trackID}",
    tag = "tracking",
    params(("trackID" = String, Path, description = "Track id, e.g. ZY0123456789")),
    responses(
        (status = 200, description = "Track with its full history"),
        (status = 404, description = "No such track", body = ErrorResponse),
    )
)]
#[get("/api/tracks/{track_id}")]
pub async fn get_track_handler(
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> impl Responder {
    let track_id = path.into_inner();

    match data.tracking.get_single.execute(&track_id).await {
        Ok(track) => ApiResponse::success("Track fetched", track),
        Err(GetTrackError::NotFound) => ApiResponse::not_found("TRACK_NOT_FOUND", "Track not found"),
        Err(GetTrackError::QueryError(e)) => {
            tracing::error!(track_id = %track_id, error = %e, "Track lookup failed");
            ApiResponse::internal_error()
        }
    }
}
