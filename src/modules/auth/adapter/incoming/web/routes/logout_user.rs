use crate::api::schemas::ErrorResponse;
use crate::auth::adapter::incoming::web::extractors::auth::AuthenticatedUser;
use crate::auth::application::domain::entities::ClientInfo;
use crate::auth::application::use_cases::logout_user::LogoutError;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, Responder};
use tracing::{error, info};

/// Sign out
///
/// Records the sign-out in the history. Tokens stay valid until they expire.
#[utoipa::path(
    post,
    path = "/api/auth/signout",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Signed out"),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "User no longer exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/auth/signout")]
pub async fn logout_user_handler(
    user: AuthenticatedUser,
    client: ClientInfo,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.logout_user_use_case.execute(user.user_id, client).await {
        Ok(()) => {
            info!(user_id = %user.user_id, "User signed out");
            ApiResponse::ok("Signed out successfully")
        }

        Err(LogoutError::UserNotFound) => ApiResponse::not_found("USER_NOT_FOUND", "User not found"),

        Err(e) => {
            error!(user_id = %user.user_id, error = %e, "Sign-out failed");
            ApiResponse::internal_error()
        }
    }
}
