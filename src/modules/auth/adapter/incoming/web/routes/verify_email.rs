use crate::api::schemas::ErrorResponse;
use crate::auth::application::use_cases::verify_user_email::{
    VerifyEmailOutcome, VerifyEmailRequest, VerifyUserEmailError,
};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, Responder};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use utoipa::ToSchema;

#[derive(Deserialize, Serialize, ToSchema)]
pub struct VerifyEmailDto {
    #[schema(example = "rina@example.com")]
    pub email: String,

    /// Six digit code from the verification email
    #[schema(example = "482913")]
    pub code: String,
}

/// Verify email address
///
/// Confirms the six digit code sent at signup. Calling it again after a
/// successful verification returns 200 without changing anything.
#[utoipa::path(
    post,
    path = "/api/auth/email-verify",
    tag = "auth",
    request_body = VerifyEmailDto,
    responses(
        (status = 200, description = "Verified, or already verified"),
        (status = 400, description = "Wrong or expired code", body = ErrorResponse),
        (status = 404, description = "No account for this email", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/auth/email-verify")]
pub async fn verify_user_email_handler(
    req: web::Json<VerifyEmailDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = req.into_inner();
    let request = match VerifyEmailRequest::new(dto.email, dto.code) {
        Ok(r) => r,
        Err(e) => return ApiResponse::bad_request("VALIDATION_ERROR", &e.to_string()),
    };

    match data.verify_user_email_use_case.execute(request).await {
        Ok(VerifyEmailOutcome::Verified(user)) => {
            info!(user_id = %user.id, "Email verified");
            ApiResponse::success("Email verified successfully", user)
        }

        Ok(VerifyEmailOutcome::AlreadyVerified) => ApiResponse::ok("Email already verified"),

        Err(VerifyUserEmailError::UserNotFound) => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }

        Err(VerifyUserEmailError::InvalidCode) => {
            warn!("Verification refused: wrong code");
            ApiResponse::bad_request("INVALID_CODE", "Invalid verification code")
        }

        Err(VerifyUserEmailError::CodeExpired) => {
            warn!("Verification refused: code expired");
            ApiResponse::bad_request("CODE_EXPIRED", "Verification code has expired")
        }

        Err(VerifyUserEmailError::DatabaseError(e)) => {
            error!(error = %e, "Email verification failed");
            ApiResponse::internal_error()
        }
    }
}
