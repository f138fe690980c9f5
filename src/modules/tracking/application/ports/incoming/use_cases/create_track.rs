use async_trait::async_trait;
use uuid::Uuid;

use crate::tracking::application::domain::entities::{Track, TrackStatus};

#[derive(Debug, Clone, PartialEq)]
pub struct CreateTrack {
    pub order_id: Uuid,
    pub status: Option<TrackStatus>,
    /// Looked up from the order when absent.
    pub track_id: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum CreateTrackError {
    #[error("Order {0} does not exist")]
    OrderNotFound(Uuid),

    #[error("Track id already exists")]
    DuplicateTrackId,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait CreateTrackUseCase: Send + Sync {
    async fn execute(&self, created_by: Uuid, request: CreateTrack)
        -> Result<Track, CreateTrackError>;
}
