use crate::api::schemas::ErrorResponse;
use crate::auth::adapter::incoming::web::extractors::auth::AdminUser;
use crate::order::application::domain::payment_update::PaymentUpdate;
use crate::order::application::ports::incoming::use_cases::UpdatePaymentError;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, Responder};
use uuid::Uuid;

/// Update the payment block of an order (admin)
///
/// Only `pType`, `pAmount`, `pOfferDiscount`, `pExtraCharge`, `pDiscount`,
/// `pReceived` and `pRefunded` are written. Other keys are ignored.
#[utoipa::path(
    post,
    path = "/api/orders/{id}/payment",
    tag = "orders",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Order id")),
    request_body(content = Object, example = json!({ "pType": "cash", "pReceived": "150" })),
    responses(
        (status = 200, description = "Order with the updated payment"),
        (status = 400, description = "Malformed id or non-object body", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 404, description = "No such order", body = ErrorResponse),
    )
)]
#[post("/api/orders/{id}/payment")]
pub async fn update_payment_handler(
    admin: AdminUser,
    path: web::Path<String>,
    body: web::Json<serde_json::Value>,
    data: web::Data<AppState>,
) -> impl Responder {
    let order_id = match Uuid::parse_str(&path.into_inner()) {
        Ok(id) => id,
        Err(_) => return ApiResponse::bad_request("INVALID_ID", "Invalid order id"),
    };

    let update = match PaymentUpdate::from_json(&body) {
        Ok(update) => update,
        Err(e) => return ApiResponse::bad_request("VALIDATION_ERROR", &e.to_string()),
    };

    match data.order.update_payment.execute(order_id, update).await {
        Ok(order) => {
            tracing::info!(admin_id = %admin.user_id, order_id = %order_id, "Payment changed by admin");
            ApiResponse::success("Payment updated", order)
        }
        Err(UpdatePaymentError::NotFound) => {
            ApiResponse::not_found("ORDER_NOT_FOUND", "Order not found")
        }
        Err(UpdatePaymentError::RepositoryError(e)) => {
            tracing::error!(order_id = %order_id, error = %e, "Payment update failed");
            ApiResponse::internal_error()
        }
    }
}
