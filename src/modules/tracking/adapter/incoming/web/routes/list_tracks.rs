use crate::api::schemas::ErrorResponse;
use crate::auth::adapter::incoming::web::extractors::auth::StaffUser;
use crate::shared::api::{ApiResponse, PageRequest};
use crate::tracking::application::domain::entities::{
    SortDirection, TrackIdPattern, TrackListFilter, TrackSort, TrackSortField, TrackStatus,
};
use crate::AppState;
use actix_web::{get, web, Responder};
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct TrackListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    /// Exact id, or a pattern using `*` / `%` as wildcards.
    pub track_id: Option<String>,
    /// Free text matched against step descriptions.
    pub search: Option<String>,
    pub status: Option<String>,
    /// `createdAt`, `updatedAt`, `currentStatus` or `trackId`.
    pub sort_by: Option<String>,
    /// `asc` or `desc`.
    pub sort_order: Option<String>,
}

/// List tracks (admin or moderator)
#[utoipa::path(
    get,
    path = "/api/tracks",
    tag = "tracking",
    security(("bearer_auth" = [])),
    params(TrackListQuery),
    responses(
        (status = 200, description = "Page of tracks"),
        (status = 400, description = "Unknown status filter", body = ErrorResponse),
        (status = 403, description = "Caller is not staff", body = ErrorResponse),
    )
)]
#[get("/api/tracks")]
pub async fn list_tracks_handler(
    staff: StaffUser,
    query: web::Query<TrackListQuery>,
    data: web::Data<AppState>,
) -> impl Responder {
    let query = query.into_inner();

    let status = match query.status.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => match raw.parse::<TrackStatus>() {
            Ok(status) => Some(status),
            Err(e) => return ApiResponse::bad_request("INVALID_STATUS", &e.to_string()),
        },
        None => None,
    };

    let filter = TrackListFilter {
        track_id: query.track_id.as_deref().and_then(TrackIdPattern::parse),
        search: query.search,
        status,
    };
    let sort = TrackSort {
        field: TrackSortField::from_param(query.sort_by.as_deref()),
        direction: SortDirection::from_param(query.sort_order.as_deref()),
    };
    let page = PageRequest::new(query.page, query.limit);

    match data.tracking.get_list.execute(filter, sort, page).await {
        Ok(result) => {
            let meta = result.meta();
            ApiResponse::paginated("Tracks fetched", result.items, meta)
        }
        Err(e) => {
            tracing::error!(user_id = %staff.user_id, error = %e, "Listing tracks failed");
            ApiResponse::internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::domain::entities::Role;
    use crate::auth::application::ports::outgoing::TokenProvider;
    use crate::shared::api::PageResult;
    use crate::tracking::application::domain::entities::tests::sample_track;
    use crate::tracking::application::domain::entities::Track;
    use crate::tracking::application::ports::incoming::use_cases::{
        ListTracksError, ListTracksUseCase,
    };
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::auth_helper::{bearer, jwt_service, token_for};
    use actix_web::{test, App};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};
    use uuid::Uuid;

    type Seen = Arc<Mutex<Option<(TrackListFilter, TrackSort, PageRequest)>>>;

    #[derive(Clone, Default)]
    struct MockList {
        seen: Seen,
    }

    #[async_trait]
    impl ListTracksUseCase for MockList {
        async fn execute(
            &self,
            filter: TrackListFilter,
            sort: TrackSort,
            page: PageRequest,
        ) -> Result<PageResult<Track>, ListTracksError> {
            *self.seen.lock().unwrap() = Some((filter, sort, page));
            let items = (0..page.limit().min(3))
                .map(|i| sample_track(&format!("ZY00000000{:02}", i)))
                .collect();
            Ok(PageResult::new(items, page, 45))
        }
    }

    async fn call(mock: MockList, uri: &str, role: Role) -> (u16, serde_json::Value) {
        let provider: Arc<dyn TokenProvider + Send + Sync> = Arc::new(jwt_service());
        let state = TestAppStateBuilder::default().with_list_tracks(mock).build();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(web::Data::new(provider))
                .service(list_tracks_handler),
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
    async fn passes_filters_through() {
        let mock = MockList::default();
        let (status, body) = call(
            mock.clone(),
            "/api/tracks?trackId=ZY*&search=customs&status=in-transit&sortBy=trackId&sortOrder=asc&page=2&limit=10",
            Role::Moderator,
        )
        .await;

        assert_eq!(status, 200);
        assert_eq!(body["meta"]["page"], 2);
        assert_eq!(body["meta"]["totalPages"], 5);

        let (filter, sort, page) = mock.seen.lock().unwrap().clone().unwrap();
        assert_eq!(filter.track_id, Some(TrackIdPattern::Like("ZY%".into())));
        assert_eq!(filter.search.as_deref(), Some("customs"));
        assert_eq!(filter.status, Some(TrackStatus::InTransit));
        assert_eq!(sort.field, TrackSortField::TrackId);
        assert_eq!(sort.direction, SortDirection::Asc);
        assert_eq!(page.offset(), 10);
    }

    #[actix_web::test]
    async fn unknown_sort_falls_back_and_limit_is_capped() {
        let mock = MockList::default();
        let (status, _) = call(
            mock.clone(),
            "/api/tracks?sortBy=passwordHash&limit=1000",
            Role::Admin,
        )
        .await;

        assert_eq!(status, 200);
        let (_, sort, page) = mock.seen.lock().unwrap().clone().unwrap();
        assert_eq!(sort.field, TrackSortField::CreatedAt);
        assert_eq!(sort.direction, SortDirection::Desc);
        assert_eq!(page.limit(), 200);
    }

    #[actix_web::test]
    async fn unknown_status_is_bad_request() {
        let (status, body) =
            call(MockList::default(), "/api/tracks?status=lost", Role::Admin).await;
        assert_eq!(status, 400);
        assert_eq!(body["error"], "INVALID_STATUS");
    }

    #[actix_web::test]
    async fn plain_user_is_forbidden() {
        let (status, _) = call(MockList::default(), "/api/tracks", Role::User).await;
        assert_eq!(status, 403);
    }
}
