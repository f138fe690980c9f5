use crate::api::schemas::ErrorResponse;
use crate::auth::adapter::incoming::web::extractors::auth::StaffUser;
use crate::shared::api::ApiResponse;
use crate::tracking::application::domain::entities::AppendTrackStep;
use crate::tracking::application::ports::incoming::use_cases::AppendTrackStepError;
use crate::AppState;
use actix_web::{put, web, Responder};

/// Append a tracking step (admin or moderator)
///
/// The only way to move a track's status. `history` cannot be sent.
#[utoipa::path(
    put,
    path = "/api/tracks/{trackID}",
    tag = "tracking",
    security(("bearer_auth" = [])),
    params(("trackID" = String, Path, description = "Track id")),
    request_body(content = Object, example = json!({
        "status": "in-transit",
        "location": "Dubai",
        "description": "Departed transit hub"
    })),
    responses(
        (status = 200, description = "Track after the append"),
        (status = 400, description = "Unknown status or forbidden field", body = ErrorResponse),
        (status = 403, description = "Caller is not staff", body = ErrorResponse),
        (status = 404, description = "No such track", body = ErrorResponse),
    )
)]
#[put("/api/tracks/{track_id}")]
pub async fn append_track_step_handler(
    staff: StaffUser,
    path: web::Path<String>,
    body: web::Json<AppendTrackStep>,
    data: web::Data<AppState>,
) -> impl Responder {
    let track_id = path.into_inner();

    match data
        .tracking
        .append_step
        .execute(staff.user_id, &track_id, body.into_inner())
        .await
    {
        Ok(track) => ApiResponse::success("Tracking updated", track),
        Err(AppendTrackStepError::NotFound) => {
            ApiResponse::not_found("TRACK_NOT_FOUND", "Track not found")
        }
        Err(AppendTrackStepError::RepositoryError(e)) => {
            tracing::error!(track_id = %track_id, error = %e, "Appending tracking step failed");
            ApiResponse::internal_error()
        }
    }
}
