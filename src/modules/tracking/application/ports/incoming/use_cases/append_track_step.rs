use async_trait::async_trait;
use uuid::Uuid;

use crate::tracking::application::domain::entities::{AppendTrackStep, Track};

#[derive(Debug, Clone, thiserror::Error)]
pub enum AppendTrackStepError {
    #[error("Track not found")]
    NotFound,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait AppendTrackStepUseCase: Send + Sync {
    async fn execute(
        &self,
        caller: Uuid,
        track_id: &str,
        request: AppendTrackStep,
    ) -> Result<Track, AppendTrackStepError>;
}
