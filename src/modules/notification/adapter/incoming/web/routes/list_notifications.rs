use crate::auth::adapter::incoming::web::extractors::auth::AuthenticatedUser;
use crate::notification::application::ports::incoming::use_cases::ListNotificationsError;
use crate::shared::api::{ApiResponse, PageQuery};
use crate::api::schemas::ErrorResponse;
use crate::AppState;
use actix_web::{get, web, Responder};

/// Caller's notifications, newest first
#[utoipa::path(
    get,
    path = "/api/notifications",
    tag = "notifications",
    security(("bearer_auth" = [])),
    params(
        ("page" = Option<u64>, Query, description = "Page number, default 1"),
        ("limit" = Option<u64>, Query, description = "Page size, default 20, max 200"),
    ),
    responses(
        (status = 200, description = "Page of notifications"),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
    )
)]
#[get("/api/notifications")]
pub async fn list_notifications_handler(
    user: AuthenticatedUser,
    query: web::Query<PageQuery>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .notification
        .list_mine
        .execute(user.user_id, query.into_inner().into())
        .await
    {
        Ok(page) => {
            let meta = page.meta();
            ApiResponse::paginated("Notifications fetched", page.items, meta)
        }
        Err(ListNotificationsError::QueryFailed(e)) => {
            tracing::error!(user_id = %user.user_id, error = %e, "Listing notifications failed");
            ApiResponse::internal_error()
        }
    }
}
