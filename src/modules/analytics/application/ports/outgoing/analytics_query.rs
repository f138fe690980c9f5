use async_trait::async_trait;

use crate::analytics::application::domain::entities::{
    AnalyticsFilter, LoginSummary, NotificationSummary, OrderSummary, PermissionSummary,
    UserSummary,
};

#[derive(Debug, Clone, thiserror::Error)]
pub enum AnalyticsQueryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Read-only aggregates. Filters arrive already validated.
#[async_trait]
pub trait AnalyticsQuery: Send + Sync {
    async fn users(&self, filter: &AnalyticsFilter) -> Result<UserSummary, AnalyticsQueryError>;

    async fn orders(&self, filter: &AnalyticsFilter) -> Result<OrderSummary, AnalyticsQueryError>;

    async fn logins(&self, filter: &AnalyticsFilter) -> Result<LoginSummary, AnalyticsQueryError>;

    async fn notifications(
        &self,
        filter: &AnalyticsFilter,
    ) -> Result<NotificationSummary, AnalyticsQueryError>;

    async fn permissions(
        &self,
        filter: &AnalyticsFilter,
    ) -> Result<PermissionSummary, AnalyticsQueryError>;
}
