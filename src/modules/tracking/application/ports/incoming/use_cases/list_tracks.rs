use async_trait::async_trait;

use crate::shared::api::{PageRequest, PageResult};
use crate::tracking::application::domain::entities::{Track, TrackListFilter, TrackSort};

#[derive(Debug, Clone, thiserror::Error)]
pub enum ListTracksError {
    #[error("Query error: {0}")]
    QueryError(String),
}

#[async_trait]
pub trait ListTracksUseCase: Send + Sync {
    async fn execute(
        &self,
        filter: TrackListFilter,
        sort: TrackSort,
        page: PageRequest,
    ) -> Result<PageResult<Track>, ListTracksError>;
}
