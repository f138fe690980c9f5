use async_trait::async_trait;

use crate::tracking::application::domain::entities::{NewTrack, Track, TrackStep};

#[derive(Debug, Clone, thiserror::Error)]
pub enum TrackRepositoryError {
    #[error("Track not found")]
    NotFound,

    #[error("Track id already exists")]
    DuplicateTrackId,

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Corrupted track record: {0}")]
    CorruptedRecord(String),
}

#[async_trait]
pub trait TrackRepository: Send + Sync {
    async fn create(&self, track: NewTrack) -> Result<Track, TrackRepositoryError>;

    /// Appends `step` to the history and moves `current_status` to its status
    /// in one statement.
    async fn append_step(
        &self,
        track_id: &str,
        step: TrackStep,
    ) -> Result<Track, TrackRepositoryError>;

    async fn delete(&self, track_id: &str) -> Result<(), TrackRepositoryError>;
}
