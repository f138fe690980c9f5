use crate::api::schemas::ErrorResponse;
use crate::auth::adapter::incoming::web::extractors::auth::AuthenticatedUser;
use crate::auth::application::domain::entities::UserIdentifier;
use crate::auth::application::use_cases::signin_history::{Requester, SigninHistoryError};
use crate::shared::api::{ApiResponse, PageQuery};
use crate::AppState;
use actix_web::{get, web, Responder};
use tracing::{error, warn};

/// Sign-in history of an account
///
/// Newest first. Users may read their own account; admins may read any.
#[utoipa::path(
    get,
    path = "/api/accounts/{phone}/sigin-historys",
    tag = "auth",
    security(("bearer_auth" = [])),
    params(
        ("phone" = String, Path, description = "Phone, email or user id of the account"),
        ("page" = Option<u64>, Query, description = "Page number, default 1"),
        ("limit" = Option<u64>, Query, description = "Page size, default 20, max 200"),
    ),
    responses(
        (status = 200, description = "Paginated history"),
        (status = 400, description = "Unrecognized identifier", body = ErrorResponse),
        (status = 403, description = "Another user's account", body = ErrorResponse),
        (status = 404, description = "No such account", body = ErrorResponse),
    )
)]
#[get("/api/accounts/{phone}/sigin-historys")]
pub async fn signin_history_handler(
    user: AuthenticatedUser,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
    data: web::Data<AppState>,
) -> impl Responder {
    let account = match UserIdentifier::parse(&path.into_inner()) {
        Ok(id) => id,
        Err(e) => return ApiResponse::bad_request("INVALID_IDENTIFIER", &e.to_string()),
    };

    let requester = Requester {
        user_id: user.user_id,
        role: user.role,
    };

    match data
        .signin_history_use_case
        .execute(requester, account, query.into_inner().into())
        .await
    {
        Ok(page) => {
            let meta = page.meta();
            ApiResponse::paginated("Sign-in history fetched", page.items, meta)
        }

        Err(SigninHistoryError::Forbidden) => {
            warn!(user_id = %user.user_id, "Refused access to another account's history");
            ApiResponse::forbidden("FORBIDDEN", "You can only view your own sign-in history")
        }

        Err(SigninHistoryError::UserNotFound) => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }

        Err(SigninHistoryError::QueryError(e)) => {
            error!(error = %e, "Sign-in history query failed");
            ApiResponse::internal_error()
        }
    }
}
