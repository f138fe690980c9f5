use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::application::domain::entities::PublicUser;
use crate::auth::application::orchestrator::user_registration::UserRegistrationError;
use crate::auth::application::use_cases::create_user::{CreateUserError, SignupRequest};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, Responder};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use utoipa::ToSchema;

/// Signup request from client
#[derive(Deserialize, Serialize, ToSchema)]
pub struct SignupRequestDto {
    #[schema(example = "Rina Akter")]
    pub name: String,

    /// Phone number, separators are stripped
    #[schema(example = "+8801711000000")]
    pub phone: String,

    #[schema(example = "rina@example.com")]
    pub email: String,

    /// At least 8 characters
    #[schema(example = "Secret123!")]
    pub password: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    #[schema(value_type = Object)]
    user: PublicUser,
    access_token: String,
    refresh_token: String,
}

/// Create an account
///
/// Creates an unverified user, emails a six digit verification code and
/// returns the sanitized user with a fresh token pair.
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    tag = "auth",
    request_body = SignupRequestDto,
    responses(
        (status = 201, description = "User created", body = inline(SuccessResponse<SignupResponse>)),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (
            status = 409,
            description = "Email or phone already registered",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "status": 409,
                "message": "Email is already registered",
                "error": "EMAIL_EXISTS"
            })
        ),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/auth/signup")]
pub async fn register_user_handler(
    req: web::Json<SignupRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = req.into_inner();

    let request = match SignupRequest::new(dto.name, dto.phone, dto.email, dto.password) {
        Ok(r) => r,
        Err(e) => return ApiResponse::bad_request("VALIDATION_ERROR", &e.to_string()),
    };

    info!(email = %request.email(), "Signup attempt");

    match data.register_user_orchestrator.register_user(request).await {
        Ok(output) => {
            info!(user_id = %output.user.id, "User registered");
            let message = output.message.clone();
            ApiResponse::created(
                &message,
                SignupResponse {
                    user: output.user,
                    access_token: output.access_token,
                    refresh_token: output.refresh_token,
                },
            )
        }

        Err(UserRegistrationError::CreateUserFailed(CreateUserError::EmailAlreadyExists)) => {
            warn!("Signup refused: email taken");
            ApiResponse::conflict("EMAIL_EXISTS", "Email is already registered")
        }

        Err(UserRegistrationError::CreateUserFailed(CreateUserError::PhoneAlreadyExists)) => {
            warn!("Signup refused: phone taken");
            ApiResponse::conflict("PHONE_EXISTS", "Phone is already registered")
        }

        Err(e) => {
            error!(error = %e, "Signup failed");
            ApiResponse::internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::domain::entities::User;
    use crate::shared::api::custom_json_config;
    use crate::tests::support::app_state_builder::{
        registration_orchestrator, TestAppStateBuilder,
    };
    use crate::tests::support::fakes::sample_user;
    use crate::tests::support::stubs::StubCreateUserUseCase;
    use actix_web::{test, App};

    fn unverified_user() -> User {
        let mut user = sample_user("rina@example.com", "+8801711000000");
        user.is_verified = false;
        user.login_count = 0;
        user.verification_code = Some("482913".to_string());
        user.verification_expires_at = Some(chrono::Utc::now() + chrono::Duration::minutes(15));
        user
    }

    fn body() -> serde_json::Value {
        serde_json::json!({
            "name": "Rina Akter",
            "phone": "+8801711000000",
            "email": "rina@example.com",
            "password": "Secret123!"
        })
    }

    async fn call(create: StubCreateUserUseCase, payload: serde_json::Value) -> (u16, serde_json::Value) {
        let state = TestAppStateBuilder::default()
            .with_register_user_orchestrator(registration_orchestrator(create))
            .build();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(custom_json_config())
                .service(register_user_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/auth/signup")
            .set_json(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status().as_u16();
        (status, test::read_body_json(resp).await)
    }

    #[actix_web::test]
    async fn signup_returns_created_user_and_tokens() {
        let (status, body) = call(StubCreateUserUseCase::ok(unverified_user()), body()).await;

        assert_eq!(status, 201);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["user"]["email"], "rina@example.com");
        assert_eq!(body["data"]["user"]["isVerified"], false);
        assert!(body["data"]["user"].get("passwordHash").is_none());
        assert!(body["data"]["user"].get("verificationCode").is_none());
        assert!(body["data"]["accessToken"].as_str().unwrap().len() > 20);
        assert!(body["data"]["refreshToken"].is_string());
    }

    #[actix_web::test]
    async fn duplicate_email_is_conflict() {
        let (status, body) = call(
            StubCreateUserUseCase::err(CreateUserError::EmailAlreadyExists),
            body(),
        )
        .await;

        assert_eq!(status, 409);
        assert_eq!(body["error"], "EMAIL_EXISTS");
    }

    #[actix_web::test]
    async fn duplicate_phone_is_conflict() {
        let (status, body) = call(
            StubCreateUserUseCase::err(CreateUserError::PhoneAlreadyExists),
            body(),
        )
        .await;

        assert_eq!(status, 409);
        assert_eq!(body["error"], "PHONE_EXISTS");
    }

    #[actix_web::test]
    async fn invalid_payload_is_bad_request() {
        let mut payload = body();
        payload["password"] = serde_json::json!("short");

        let (status, body) = call(StubCreateUserUseCase::ok(unverified_user()), payload).await;

        assert_eq!(status, 400);
        assert_eq!(body["error"], "VALIDATION_ERROR");
        assert!(body["message"].as_str().unwrap().contains("8 characters"));
    }

    #[actix_web::test]
    async fn missing_field_is_bad_request() {
        let (status, body) = call(
            StubCreateUserUseCase::ok(unverified_user()),
            serde_json::json!({ "email": "rina@example.com" }),
        )
        .await;

        assert_eq!(status, 400);
        assert_eq!(body["error"], "VALIDATION_ERROR");
    }

    #[actix_web::test]
    async fn repository_failure_hides_details() {
        let (status, body) = call(
            StubCreateUserUseCase::err(CreateUserError::RepositoryError("pool closed".into())),
            body(),
        )
        .await;

        assert_eq!(status, 500);
        assert_eq!(body["message"], "An unexpected error occurred");
    }
}
