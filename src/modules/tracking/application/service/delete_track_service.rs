use async_trait::async_trait;

use crate::tracking::application::ports::incoming::use_cases::{
    DeleteTrackError, DeleteTrackUseCase,
};
use crate::tracking::application::ports::outgoing::{TrackRepository, TrackRepositoryError};

pub struct DeleteTrackService<R>
where
    R: TrackRepository,
{
    repository: R,
}

impl<R> DeleteTrackService<R>
where
    R: TrackRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> DeleteTrackUseCase for DeleteTrackService<R>
where
    R: TrackRepository + Send + Sync,
{
    async fn execute(&self, track_id: &str) -> Result<(), DeleteTrackError> {
        match self.repository.delete(track_id).await {
            Ok(()) => {
                tracing::info!(track_id = %track_id, "Track deleted");
                Ok(())
            }
            Err(TrackRepositoryError::NotFound) => Err(DeleteTrackError::NotFound),
            Err(e) => Err(DeleteTrackError::RepositoryError(e.to_string())),
        }
    }
}
