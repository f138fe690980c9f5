use crate::api::schemas::{ErrorResponse, PageMetaSchema};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

use crate::auth::adapter::incoming::web::routes::{
    LoginRequestDto, RefreshTokenDto, SigninResponse, SignupRequestDto, SignupResponse,
    VerifyEmailDto,
};
use crate::tracking::adapter::incoming::web::routes::CreateTrackDto;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Courier API",
        version = "1.0.0",
        description = "Accounts, orders, shipment tracking, permissions, notifications and analytics",
    ),
    paths(
        // Auth
        crate::auth::adapter::incoming::web::routes::register_user_handler,
        crate::auth::adapter::incoming::web::routes::login_user_handler,
        crate::auth::adapter::incoming::web::routes::verify_user_email_handler,
        crate::auth::adapter::incoming::web::routes::refresh_token_handler,
        crate::auth::adapter::incoming::web::routes::logout_user_handler,
        crate::auth::adapter::incoming::web::routes::signin_history_handler,
        crate::auth::adapter::incoming::web::routes::set_user_status_handler,

        // Tracking
        crate::tracking::adapter::incoming::web::routes::list_tracks_handler,
        crate::tracking::adapter::incoming::web::routes::create_track_handler,
        crate::tracking::adapter::incoming::web::routes::get_track_handler,
        crate::tracking::adapter::incoming::web::routes::append_track_step_handler,
        crate::tracking::adapter::incoming::web::routes::delete_track_handler,

        // Orders
        crate::order::adapter::incoming::web::routes::create_order_handler,
        crate::order::adapter::incoming::web::routes::get_order_handler,
        crate::order::adapter::incoming::web::routes::update_payment_handler,

        // Permissions, notifications, analytics
        crate::permission::adapter::incoming::web::routes::get_permissions_handler,
        crate::permission::adapter::incoming::web::routes::set_permissions_handler,
        crate::notification::adapter::incoming::web::routes::list_notifications_handler,
        crate::analytics::adapter::incoming::web::routes::get_summary_handler,
    ),
    components(
        schemas(
            ErrorResponse,
            PageMetaSchema,
            SignupRequestDto,
            SignupResponse,
            LoginRequestDto,
            SigninResponse,
            VerifyEmailDto,
            RefreshTokenDto,
            CreateTrackDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Signup, signin, tokens and sign-in history"),
        (name = "users", description = "Account administration"),
        (name = "tracking", description = "Shipment tracks and their status history"),
        (name = "orders", description = "Parcel orders and payments"),
        (name = "permissions", description = "Per-user permission sets"),
        (name = "notifications", description = "In-app notifications"),
        (name = "analytics", description = "Admin summaries"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access token from /api/auth/singin"))
                        .build(),
                ),
            )
        }
    }
}
