use crate::analytics::application::domain::entities::{AnalyticsFilter, AnalyticsResource};
use crate::analytics::application::ports::incoming::use_cases::GetSummaryError;
use crate::api::schemas::ErrorResponse;
use crate::auth::adapter::incoming::web::extractors::auth::AdminUser;
use crate::auth::application::domain::entities::Role;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{get, web, HttpResponse, Responder};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AnalyticsParams {
    /// RFC 3339 lower bound on creation time.
    pub from: Option<String>,
    /// RFC 3339 upper bound on creation time.
    pub to: Option<String>,
    /// Restrict to rows owned by users of this role.
    pub role: Option<String>,
    /// Resource specific, e.g. `active`, `failed`, `unread`, `delivered`.
    pub status: Option<String>,
}

fn non_blank(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn parse_instant(name: &str, raw: Option<String>) -> Result<Option<DateTime<Utc>>, HttpResponse> {
    match non_blank(raw) {
        Some(value) => DateTime::parse_from_rfc3339(&value)
            .map(|t| Some(t.with_timezone(&Utc)))
            .map_err(|_| {
                ApiResponse::bad_request(
                    "INVALID_FILTER",
                    &format!("`{}` must be an RFC 3339 timestamp", name),
                )
            }),
        None => Ok(None),
    }
}

impl AnalyticsParams {
    fn into_filter(self) -> Result<AnalyticsFilter, HttpResponse> {
        let role = match non_blank(self.role) {
            Some(raw) => match raw.parse::<Role>() {
                Ok(role) => Some(role),
                Err(e) => return Err(ApiResponse::bad_request("INVALID_FILTER", &e.to_string())),
            },
            None => None,
        };

        Ok(AnalyticsFilter {
            from: parse_instant("from", self.from)?,
            to: parse_instant("to", self.to)?,
            role,
            status: non_blank(self.status).map(|s| s.to_ascii_lowercase()),
        })
    }
}

/// Aggregated figures for one resource (admin)
#[utoipa::path(
    get,
    path = "/api/analytics/{resource}",
    tag = "analytics",
    security(("bearer_auth" = [])),
    params(
        ("resource" = String, Path, description = "users, orders, logins, notifications or permissions"),
        AnalyticsParams,
    ),
    responses(
        (status = 200, description = "Summary for the resource"),
        (status = 400, description = "Invalid filter", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 404, description = "Unknown resource", body = ErrorResponse),
    )
)]
#[get("/api/analytics/{resource}")]
pub async fn get_summary_handler(
    admin: AdminUser,
    path: web::Path<String>,
    query: web::Query<AnalyticsParams>,
    data: web::Data<AppState>,
) -> impl Responder {
    let resource = match path.into_inner().parse::<AnalyticsResource>() {
        Ok(resource) => resource,
        Err(e) => return ApiResponse::not_found("RESOURCE_NOT_FOUND", &e.to_string()),
    };

    let filter = match query.into_inner().into_filter() {
        Ok(filter) => filter,
        Err(resp) => return resp,
    };

    match data.analytics.summary.execute(resource, filter).await {
        Ok(summary) => {
            tracing::debug!(admin_id = %admin.user_id, resource = %resource, "Analytics served");
            ApiResponse::success("Analytics fetched", summary)
        }
        Err(GetSummaryError::InvalidFilter(e)) => {
            ApiResponse::bad_request("INVALID_FILTER", &e.to_string())
        }
        Err(GetSummaryError::QueryError(e)) => {
            tracing::error!(resource = %resource, error = %e, "Analytics failed");
            ApiResponse::internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::application::domain::entities::{
        AnalyticsSummary, KeyCount, UserSummary,
    };
    use crate::analytics::application::ports::incoming::use_cases::GetSummaryUseCase;
    use crate::auth::application::ports::outgoing::TokenProvider;
    use crate::shared::api::custom_query_config;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::auth_helper::{bearer, jwt_service, token_for};
    use actix_web::{test, App};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};
    use uuid::Uuid;

    #[derive(Clone, Default)]
    struct MockSummary {
        seen: Arc<Mutex<Option<(AnalyticsResource, AnalyticsFilter)>>>,
    }

    #[async_trait]
    impl GetSummaryUseCase for MockSummary {
        async fn execute(
            &self,
            resource: AnalyticsResource,
            filter: AnalyticsFilter,
        ) -> Result<AnalyticsSummary, GetSummaryError> {
            filter.validate_for(resource)?;
            *self.seen.lock().unwrap() = Some((resource, filter));
            Ok(AnalyticsSummary::Users(UserSummary {
                total: 3,
                active: 2,
                inactive: 1,
                verified: 3,
                unverified: 0,
                by_role: vec![KeyCount {
                    key: "user".into(),
                    count: 3,
                }],
                signups_per_month: vec![],
            }))
        }
    }

    async fn call(mock: MockSummary, uri: &str, role: Role) -> (u16, serde_json::Value) {
        let provider: Arc<dyn TokenProvider + Send + Sync> = Arc::new(jwt_service());
        let state = TestAppStateBuilder::default().with_analytics(mock).build();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(web::Data::new(provider))
                .app_data(custom_query_config())
                .service(get_summary_handler),
        )
        .await;

        let req = test::TestRequest::get()
            .uri(uri)
            .insert_header(bearer(&token_for(Uuid::new_v4(), role)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status().as_u16();
        (status, test::read_body_json(resp).await)
    }

    #[actix_web::test]
    async fn admin_gets_user_summary_with_filters() {
        let mock = MockSummary::default();
        let (status, body) = call(
            mock.clone(),
            "/api/analytics/users?from=2025-01-01T00:00:00Z&role=moderator&status=Active",
            Role::Admin,
        )
        .await;

        assert_eq!(status, 200);
        assert_eq!(body["data"]["total"], 3);
        assert_eq!(body["data"]["byRole"][0]["key"], "user");

        let (resource, filter) = mock.seen.lock().unwrap().clone().unwrap();
        assert_eq!(resource, AnalyticsResource::Users);
        assert_eq!(filter.role, Some(Role::Moderator));
        assert_eq!(filter.status.as_deref(), Some("active"));
        assert!(filter.from.is_some());
        assert!(filter.to.is_none());
    }

    #[actix_web::test]
    async fn moderator_is_forbidden() {
        let (status, body) = call(MockSummary::default(), "/api/analytics/orders", Role::Moderator).await;
        assert_eq!(status, 403);
        assert_eq!(body["error"], "FORBIDDEN");
    }

    #[actix_web::test]
    async fn unknown_resource() {
        let (status, body) = call(MockSummary::default(), "/api/analytics/reviews", Role::Admin).await;
        assert_eq!(status, 404);
        assert_eq!(body["error"], "RESOURCE_NOT_FOUND");
    }

    #[actix_web::test]
    async fn malformed_timestamp() {
        let (status, body) = call(
            MockSummary::default(),
            "/api/analytics/logins?to=yesterday",
            Role::Admin,
        )
        .await;
        assert_eq!(status, 400);
        assert_eq!(body["error"], "INVALID_FILTER");
    }

    #[actix_web::test]
    async fn status_outside_resource_vocabulary() {
        let (status, body) = call(
            MockSummary::default(),
            "/api/analytics/permissions?status=unread",
            Role::Admin,
        )
        .await;
        assert_eq!(status, 400);
        assert_eq!(body["error"], "INVALID_FILTER");
    }

    #[actix_web::test]
    async fn inverted_range() {
        let (status, body) = call(
            MockSummary::default(),
            "/api/analytics/notifications?from=2025-03-01T00:00:00Z&to=2025-02-01T00:00:00Z",
            Role::Admin,
        )
        .await;
        assert_eq!(status, 400);
        assert_eq!(body["message"], "`from` must not be later than `to`");
    }
}
