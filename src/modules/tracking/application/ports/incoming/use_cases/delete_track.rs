use async_trait::async_trait;

#[derive(Debug, Clone, thiserror::Error)]
pub enum DeleteTrackError {
    #[error("Track not found")]
    NotFound,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait DeleteTrackUseCase: Send + Sync {
    async fn execute(&self, track_id: &str) -> Result<(), DeleteTrackError>;
}
