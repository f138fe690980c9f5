use async_trait::async_trait;

use crate::analytics::application::domain::entities::{
    AnalyticsFilter, AnalyticsFilterError, AnalyticsResource, AnalyticsSummary,
};

#[derive(Debug, Clone, thiserror::Error)]
pub enum GetSummaryError {
    #[error(transparent)]
    InvalidFilter(#[from] AnalyticsFilterError),

    #[error("Query error: {0}")]
    QueryError(String),
}

#[async_trait]
pub trait GetSummaryUseCase: Send + Sync {
    async fn execute(
        &self,
        resource: AnalyticsResource,
        filter: AnalyticsFilter,
    ) -> Result<AnalyticsSummary, GetSummaryError>;
}
