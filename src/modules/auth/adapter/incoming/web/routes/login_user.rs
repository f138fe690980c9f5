use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::application::domain::entities::{ClientInfo, PublicUser};
use crate::auth::application::use_cases::login_user::{LoginError, LoginRequest};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, Responder};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use utoipa::ToSchema;

/// Sign-in request. `identifier` may be an email or a phone; `email` and
/// `phone` are accepted as aliases.
#[derive(Deserialize, Serialize, ToSchema)]
pub struct LoginRequestDto {
    #[schema(example = "rina@example.com")]
    pub identifier: Option<String>,

    pub email: Option<String>,

    pub phone: Option<String>,

    #[schema(example = "Secret123!")]
    pub password: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SigninResponse {
    #[schema(value_type = Object)]
    user: PublicUser,
    access_token: String,
    refresh_token: String,
}

/// Sign in
///
/// Authenticates by email or phone and returns the user with an access and a refresh token.
/// Every attempt is written to the sign-in history.
#[utoipa::path(
    post,
    path = "/api/auth/singin",
    tag = "auth",
    request_body = LoginRequestDto,
    responses(
        (
            status = 200,
            description = "Signed in",
            body = inline(SuccessResponse<SigninResponse>),
            example = json!({
                "success": true,
                "status": 200,
                "message": "Signed in successfully",
                "data": {
                    "user": { "id": "123e4567-e89b-12d3-a456-426614174000", "role": "user", "loginCount": 4 },
                    "accessToken": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
                    "refreshToken": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9..."
                }
            })
        ),
        (status = 401, description = "Wrong password", body = ErrorResponse),
        (status = 403, description = "Account is inactive", body = ErrorResponse),
        (status = 404, description = "No account for this identifier", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/auth/singin")]
pub async fn login_user_handler(
    req: web::Json<LoginRequestDto>,
    client: ClientInfo,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = req.into_inner();
    let identifier = dto
        .identifier
        .or(dto.email)
        .or(dto.phone)
        .unwrap_or_default();

    let request = match LoginRequest::new(&identifier, dto.password) {
        Ok(r) => r,
        Err(e) => return ApiResponse::bad_request("VALIDATION_ERROR", &e.to_string()),
    };

    info!(identifier = %request.identifier(), "Sign-in attempt");

    match data.login_user_use_case.execute(request, client).await {
        Ok(response) => {
            info!(user_id = %response.user.id, "User signed in");
            ApiResponse::success(
                "Signed in successfully",
                SigninResponse {
                    user: response.user,
                    access_token: response.access_token,
                    refresh_token: response.refresh_token,
                },
            )
        }

        Err(LoginError::UserNotFound) => {
            warn!("Sign-in failed: unknown identifier");
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }

        Err(LoginError::AccountInactive) => {
            warn!("Sign-in failed: inactive account");
            ApiResponse::forbidden("ACCOUNT_INACTIVE", "Account is inactive")
        }

        Err(LoginError::InvalidCredentials) => {
            warn!("Sign-in failed: invalid credentials");
            ApiResponse::unauthorized("INVALID_CREDENTIALS", "Invalid credentials")
        }

        Err(e) => {
            error!(error = %e, "Sign-in failed");
            ApiResponse::internal_error()
        }
    }
}
