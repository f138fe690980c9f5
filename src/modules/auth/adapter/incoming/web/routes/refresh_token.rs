use crate::api::schemas::ErrorResponse;
use crate::auth::application::use_cases::refresh_token::{RefreshTokenError, RefreshTokenRequest};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, Responder};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use utoipa::ToSchema;

#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenDto {
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub refresh_token: String,
}

/// Rotate tokens
///
/// Exchanges a valid refresh token for a new access and refresh pair.
#[utoipa::path(
    post,
    path = "/api/auth/refresh-token",
    tag = "auth",
    request_body = RefreshTokenDto,
    responses(
        (status = 200, description = "New token pair"),
        (status = 401, description = "Invalid or expired refresh token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/auth/refresh-token")]
pub async fn refresh_token_handler(
    req: web::Json<RefreshTokenDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let request = match RefreshTokenRequest::new(req.into_inner().refresh_token) {
        Ok(r) => r,
        Err(e) => return ApiResponse::bad_request("VALIDATION_ERROR", &e.to_string()),
    };

    match data.refresh_token_use_case.execute(request).await {
        Ok(tokens) => ApiResponse::success("Token refreshed successfully", tokens),

        Err(RefreshTokenError::InvalidToken(e)) => {
            debug!(error = %e, "Refresh token rejected");
            ApiResponse::unauthorized("INVALID_REFRESH_TOKEN", "Invalid or expired refresh token")
        }

        Err(RefreshTokenError::UserNotFound) => {
            ApiResponse::unauthorized("INVALID_REFRESH_TOKEN", "Invalid or expired refresh token")
        }

        Err(RefreshTokenError::AccountInactive) => {
            ApiResponse::unauthorized("ACCOUNT_INACTIVE", "Account is inactive")
        }

        Err(e) => {
            error!(error = %e, "Token refresh failed");
            ApiResponse::internal_error()
        }
    }
}
