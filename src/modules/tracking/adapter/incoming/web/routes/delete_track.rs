use crate::api::schemas::ErrorResponse;
use crate::auth::adapter::incoming::web::extractors::auth::AdminUser;
use crate::shared::api::ApiResponse;
use crate::tracking::application::ports::incoming::use_cases::DeleteTrackError;
use crate::AppState;
use actix_web::{delete, web, Responder};

/// Delete a track (admin)
#[utoipa::path(
    delete,
    path = "/api/tracks/{trackID}",
    tag = "tracking",
    security(("bearer_auth" = [])),
    params(("trackID" = String, Path, description = "Track id")),
    responses(
        (status = 200, description = "Track deleted"),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 404, description = "No such track", body = ErrorResponse),
    )
)]
#[delete("/api/tracks/{track_id}")]
pub async fn delete_track_handler(
    admin: AdminUser,
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> impl Responder {
    let track_id = path.into_inner();

    match data.tracking.delete.execute(&track_id).await {
        Ok(()) => {
            tracing::info!(admin_id = %admin.user_id, track_id = %track_id, "Track removed by admin");
            ApiResponse::ok("Track deleted")
        }
        Err(DeleteTrackError::NotFound) => {
            ApiResponse::not_found("TRACK_NOT_FOUND", "Track not found")
        }
        Err(DeleteTrackError::RepositoryError(e)) => {
            tracing::error!(track_id = %track_id, error = %e, "Track delete failed");
            ApiResponse::internal_error()
        }
    }
}
