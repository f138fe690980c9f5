use crate::api::schemas::ErrorResponse;
use crate::auth::adapter::incoming::web::extractors::auth::AuthenticatedUser;
use crate::auth::application::use_cases::signin_history::Requester;
use crate::permission::application::ports::incoming::use_cases::GetPermissionsError;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{get, web, Responder};
use uuid::Uuid;

/// Read a user's permission set (self or admin)
#[utoipa::path(
    get,
    path = "/api/permissions/{userId}",
    tag = "permissions",
    security(("bearer_auth" = [])),
    params(("userId" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "Permission set"),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 403, description = "Neither the user nor an admin", body = ErrorResponse),
        (status = 404, description = "No permission set for this user", body = ErrorResponse),
    )
)]
#[get("/api/permissions/{user_id}")]
pub async fn get_permissions_handler(
    user: AuthenticatedUser,
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> impl Responder {
    let user_id = match Uuid::parse_str(&path.into_inner()) {
        Ok(id) => id,
        Err(_) => return ApiResponse::bad_request("INVALID_ID", "Invalid user id"),
    };

    let requester = Requester {
        user_id: user.user_id,
        role: user.role,
    };

    match data.permission.get.execute(requester, user_id).await {
        Ok(permission) => ApiResponse::success("Permissions fetched", permission),
        Err(GetPermissionsError::NotFound) => {
            ApiResponse::not_found("PERMISSIONS_NOT_FOUND", "No permissions set for this user")
        }
        Err(GetPermissionsError::Forbidden) => {
            ApiResponse::forbidden("FORBIDDEN", "You are not allowed to view these permissions")
        }
        Err(GetPermissionsError::QueryError(e)) => {
            tracing::error!(user_id = %user_id, error = %e, "Permission lookup failed");
            ApiResponse::internal_error()
        }
    }
}
