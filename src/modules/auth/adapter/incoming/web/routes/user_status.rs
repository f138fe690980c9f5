use crate::api::schemas::ErrorResponse;
use crate::auth::adapter::incoming::web::extractors::auth::AdminUser;
use crate::auth::application::use_cases::set_user_status::{
    SetUserStatusError, SetUserStatusRequest,
};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{patch, web, Responder};
use tracing::{error, info};
use uuid::Uuid;

/// Activate or deactivate a user (admin)
#[utoipa::path(
    patch,
    path = "/api/users/{id}/status",
    tag = "auth",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "User id")),
    request_body(content = Object, example = json!({ "isActive": false })),
    responses(
        (status = 200, description = "Updated user"),
        (status = 400, description = "Malformed id or body", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 404, description = "No such user", body = ErrorResponse),
    )
)]
#[patch("/api/users/{id}/status")]
pub async fn set_user_status_handler(
    admin: AdminUser,
    path: web::Path<String>,
    body: web::Json<SetUserStatusRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let user_id = match Uuid::parse_str(&path.into_inner()) {
        Ok(id) => id,
        Err(_) => return ApiResponse::bad_request("INVALID_ID", "Invalid user id"),
    };
    let is_active = body.into_inner().is_active;

    match data
        .set_user_status_use_case
        .execute(user_id, is_active)
        .await
    {
        Ok(user) => {
            info!(admin_id = %admin.user_id, user_id = %user_id, is_active, "User status changed");
            ApiResponse::success("User status updated", user)
        }

        Err(SetUserStatusError::UserNotFound) => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }

        Err(SetUserStatusError::DatabaseError(e)) => {
            error!(error = %e, "Status update failed");
            ApiResponse::internal_error()
        }
    }
}
