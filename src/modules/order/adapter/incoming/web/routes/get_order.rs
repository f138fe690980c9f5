use crate::api::schemas::ErrorResponse;
use crate::auth::adapter::incoming::web::extractors::auth::AuthenticatedUser;
use crate::auth::application::use_cases::signin_history::Requester;
use crate::order::application::ports::incoming::use_cases::GetOrderError;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{get, web, Responder};
use uuid::Uuid;

/// Fetch one order (staff, sender or receiver)
#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    tag = "orders",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order"),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 403, description = "Caller is not a party to the order", body = ErrorResponse),
        (status = 404, description = "No such order", body = ErrorResponse),
    )
)]
#[get("/api/orders/{id}")]
pub async fn get_order_handler(
    user: AuthenticatedUser,
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> impl Responder {
    let order_id = match Uuid::parse_str(&path.into_inner()) {
        Ok(id) => id,
        Err(_) => return ApiResponse::bad_request("INVALID_ID", "Invalid order id"),
    };

    let requester = Requester {
        user_id: user.user_id,
        role: user.role,
    };

    match data.order.get_single.execute(requester, order_id).await {
        Ok(order) => ApiResponse::success("Order fetched", order),
        Err(GetOrderError::NotFound) => ApiResponse::not_found("ORDER_NOT_FOUND", "Order not found"),
        Err(GetOrderError::Forbidden) => {
            ApiResponse::forbidden("FORBIDDEN", "You are not allowed to view this order")
        }
        Err(GetOrderError::QueryError(e)) => {
            tracing::error!(order_id = %order_id, error = %e, "Order lookup failed");
            ApiResponse::internal_error()
        }
    }
}
