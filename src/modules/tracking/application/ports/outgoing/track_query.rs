use async_trait::async_trait;

use crate::shared::api::{PageRequest, PageResult};
use crate::tracking::application::domain::entities::{Track, TrackListFilter, TrackSort};

#[derive(Debug, Clone, thiserror::Error)]
pub enum TrackQueryError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Corrupted track record: {0}")]
    CorruptedRecord(String),
}

#[async_trait]
pub trait TrackQuery: Send + Sync {
    async fn find_by_track_id(&self, track_id: &str) -> Result<Option<Track>, TrackQueryError>;

    async fn list(
        &self,
        filter: TrackListFilter,
        sort: TrackSort,
        page: PageRequest,
    ) -> Result<PageResult<Track>, TrackQueryError>;
}
