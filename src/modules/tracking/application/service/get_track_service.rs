use async_trait::async_trait;

use crate::tracking::application::domain::entities::Track;
use crate::tracking::application::ports::incoming::use_cases::{GetTrackError, GetTrackUseCase};
use crate::tracking::application::ports::outgoing::TrackQuery;

pub struct GetTrackService<Q>
where
    Q: TrackQuery,
{
    query: Q,
}

impl<Q> GetTrackService<Q>
where
    Q: TrackQuery,
{
    pub fn new(query: Q) -> Self {
        Self { query }
    }
}

#[async_trait]
impl<Q> GetTrackUseCase for GetTrackService<Q>
where
    Q: TrackQuery + Send + Sync,
{
    async fn execute(&self, track_id: &str) -> Result<Track, GetTrackError> {
        self.query
            .find_by_track_id(track_id.trim())
            .await
            .map_err(|e| GetTrackError::QueryError(e.to_string()))?
            .ok_or(GetTrackError::NotFound)
    }
}
