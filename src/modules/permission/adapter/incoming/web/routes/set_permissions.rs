use crate::api::schemas::ErrorResponse;
use crate::auth::adapter::incoming::web::extractors::auth::AdminUser;
use crate::permission::application::domain::entities::PermissionUpdate;
use crate::permission::application::ports::incoming::use_cases::SetPermissionsError;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{put, web, Responder};
use uuid::Uuid;

/// Grant, replace or revoke a user's permissions (admin)
///
/// Both fields are optional. The first grant creates the set, later calls
/// update it in place.
#[utoipa::path(
    put,
    path = "/api/permissions/{userId}",
    tag = "permissions",
    security(("bearer_auth" = [])),
    params(("userId" = Uuid, Path, description = "User id")),
    request_body(content = Object, example = json!({ "permissions": ["tracks:write"], "isActive": true })),
    responses(
        (status = 200, description = "Saved permission set"),
        (status = 400, description = "Malformed id or invalid keys", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 404, description = "No such user", body = ErrorResponse),
    )
)]
#[put("/api/permissions/{user_id}")]
pub async fn set_permissions_handler(
    admin: AdminUser,
    path: web::Path<String>,
    body: web::Json<PermissionUpdate>,
    data: web::Data<AppState>,
) -> impl Responder {
    let user_id = match Uuid::parse_str(&path.into_inner()) {
        Ok(id) => id,
        Err(_) => return ApiResponse::bad_request("INVALID_ID", "Invalid user id"),
    };

    match data
        .permission
        .set
        .execute(admin.user_id, user_id, body.into_inner())
        .await
    {
        Ok(permission) => ApiResponse::success("Permissions saved", permission),
        Err(SetPermissionsError::UserNotFound) => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        Err(SetPermissionsError::InvalidUpdate(e)) => {
            ApiResponse::bad_request("VALIDATION_ERROR", &e.to_string())
        }
        Err(SetPermissionsError::RepositoryError(e)) => {
            tracing::error!(user_id = %user_id, error = %e, "Permission save failed");
            ApiResponse::internal_error()
        }
    }
}
