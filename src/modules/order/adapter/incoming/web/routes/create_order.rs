use crate::api::schemas::ErrorResponse;
use crate::auth::adapter::incoming::web::extractors::auth::AuthenticatedUser;
use crate::order::application::ports::incoming::use_cases::{
    CreateOrderError, CreateOrderRequest,
};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, Responder};

/// Book a new parcel order
#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "orders",
    security(("bearer_auth" = [])),
    request_body(content = Object, description = "`{ parcel, payment? }`"),
    responses(
        (status = 201, description = "Order created with a fresh track id"),
        (status = 400, description = "Parcel failed validation", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
    )
)]
#[post("/api/orders")]
pub async fn create_order_handler(
    user: AuthenticatedUser,
    body: web::Json<CreateOrderRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .order
        .create
        .execute(user.user_id, body.into_inner())
        .await
    {
        Ok(order) => ApiResponse::created("Order created", order),

        Err(CreateOrderError::InvalidParcel(e)) => {
            ApiResponse::bad_request("VALIDATION_ERROR", &e.to_string())
        }

        Err(e) => {
            tracing::error!(user_id = %user.user_id, error = %e, "Order creation failed");
            ApiResponse::internal_error()
        }
    }
}
