use std::sync::Arc;

use crate::analytics::application::ports::incoming::use_cases::GetSummaryUseCase;

#[derive(Clone)]
pub struct AnalyticsUseCases {
    pub summary: Arc<dyn GetSummaryUseCase + Send + Sync>,
}
