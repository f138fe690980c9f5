use async_trait::async_trait;

use crate::analytics::application::domain::entities::{
    AnalyticsFilter, AnalyticsResource, AnalyticsSummary,
};
use crate::analytics::application::ports::incoming::use_cases::{
    GetSummaryError, GetSummaryUseCase,
};
use crate::analytics::application::ports::outgoing::AnalyticsQuery;

pub struct GetSummaryService<Q>
where
    Q: AnalyticsQuery,
{
    query: Q,
}

impl<Q> GetSummaryService<Q>
where
    Q: AnalyticsQuery,
{
    pub fn new(query: Q) -> Self {
        Self { query }
    }
}

#[async_trait]
impl<Q> GetSummaryUseCase for GetSummaryService<Q>
where
    Q: AnalyticsQuery + Send + Sync,
{
    async fn execute(
        &self,
        resource: AnalyticsResource,
        filter: AnalyticsFilter,
    ) -> Result<AnalyticsSummary, GetSummaryError> {
        filter.validate_for(resource)?;

        let summary = match resource {
            AnalyticsResource::Users => self.query.users(&filter).await.map(AnalyticsSummary::Users),
            AnalyticsResource::Orders => {
                self.query.orders(&filter).await.map(AnalyticsSummary::Orders)
            }
            AnalyticsResource::Logins => {
                self.query.logins(&filter).await.map(AnalyticsSummary::Logins)
            }
            AnalyticsResource::Notifications => self
                .query
                .notifications(&filter)
                .await
                .map(AnalyticsSummary::Notifications),
            AnalyticsResource::Permissions => self
                .query
                .permissions(&filter)
                .await
                .map(AnalyticsSummary::Permissions),
        };

        summary.map_err(|e| {
            tracing::error!(resource = %resource, error = %e, "Analytics query failed");
            GetSummaryError::QueryError(e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::application::domain::entities::{
        AnalyticsFilterError, LoginSummary, NotificationSummary, OrderSummary, PermissionSummary,
        UserSummary,
    };
    use crate::analytics::application::ports::outgoing::AnalyticsQueryError;
    use mockall::mock;

    mock! {
        pub AnalyticsQueryMock {}
        #[async_trait]
        impl AnalyticsQuery for AnalyticsQueryMock {
            async fn users(&self, filter: &AnalyticsFilter) -> Result<UserSummary, AnalyticsQueryError>;
            async fn orders(&self, filter: &AnalyticsFilter) -> Result<OrderSummary, AnalyticsQueryError>;
            async fn logins(&self, filter: &AnalyticsFilter) -> Result<LoginSummary, AnalyticsQueryError>;
            async fn notifications(&self, filter: &AnalyticsFilter) -> Result<NotificationSummary, AnalyticsQueryError>;
            async fn permissions(&self, filter: &AnalyticsFilter) -> Result<PermissionSummary, AnalyticsQueryError>;
        }
    }

    #[tokio::test]
    async fn dispatches_to_matching_aggregate() {
        let mut query = MockAnalyticsQueryMock::new();
        query.expect_logins().times(1).returning(|_| {
            Ok(LoginSummary {
                attempts: 4,
                successes: 3,
                failures: 1,
                ..Default::default()
            })
        });
        query.expect_users().never();

        let summary = GetSummaryService::new(query)
            .execute(AnalyticsResource::Logins, AnalyticsFilter::default())
            .await
            .unwrap();

        match summary {
            AnalyticsSummary::Logins(s) => assert_eq!(s.failures, 1),
            other => panic!("unexpected summary: {:?}", other),
        }
    }

    #[tokio::test]
    async fn invalid_status_never_reaches_store() {
        let mut query = MockAnalyticsQueryMock::new();
        query.expect_notifications().never();

        let filter = AnalyticsFilter {
            status: Some("archived".into()),
            ..Default::default()
        };
        let result = GetSummaryService::new(query)
            .execute(AnalyticsResource::Notifications, filter)
            .await;

        assert!(matches!(
            result,
            Err(GetSummaryError::InvalidFilter(
                AnalyticsFilterError::InvalidStatus { .. }
            ))
        ));
    }

    #[tokio::test]
    async fn store_failure_is_query_error() {
        let mut query = MockAnalyticsQueryMock::new();
        query
            .expect_permissions()
            .returning(|_| Err(AnalyticsQueryError::DatabaseError("timeout".into())));

        let result = GetSummaryService::new(query)
            .execute(AnalyticsResource::Permissions, AnalyticsFilter::default())
            .await;
        assert!(matches!(result, Err(GetSummaryError::QueryError(_))));
    }
}
