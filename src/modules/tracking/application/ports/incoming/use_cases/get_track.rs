use async_trait::async_trait;

use crate::tracking::application::domain::entities::Track;

#[derive(Debug, Clone, thiserror::Error)]
pub enum GetTrackError {
    #[error("Track not found")]
    NotFound,

    #[error("Query error: {0}")]
    QueryError(String),
}

#[async_trait]
pub trait GetTrackUseCase: Send + Sync {
    async fn execute(&self, track_id: &str) -> Result<Track, GetTrackError>;
}
