use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::order::application::ports::outgoing::OrderQuery;
use crate::tracking::application::domain::entities::{NewTrack, Track, TrackStep};
use crate::tracking::application::ports::incoming::use_cases::{
    CreateTrack, CreateTrackError, CreateTrackUseCase,
};
use crate::tracking::application::ports::outgoing::{TrackRepository, TrackRepositoryError};

pub struct CreateTrackService<R, Q>
where
    R: TrackRepository,
    Q: OrderQuery,
{
    repository: R,
    orders: Q,
}

impl<R, Q> CreateTrackService<R, Q>
where
    R: TrackRepository,
    Q: OrderQuery,
{
    pub fn new(repository: R, orders: Q) -> Self {
        Self { repository, orders }
    }

    /// Resolves the track id before the track exists: the supplied one, or the
    /// parent order's.
    async fn resolve_track_id(&self, request: &CreateTrack) -> Result<String, CreateTrackError> {
        if let Some(track_id) = request
            .track_id
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
        {
            return Ok(track_id.to_string());
        }

        match self.orders.find_by_id(request.order_id).await {
            Ok(Some(order)) => Ok(order.track_id),
            Ok(None) => Err(CreateTrackError::OrderNotFound(request.order_id)),
            Err(e) => Err(CreateTrackError::RepositoryError(e.to_string())),
        }
    }
}

#[async_trait]
impl<R, Q> CreateTrackUseCase for CreateTrackService<R, Q>
where
    R: TrackRepository + Send + Sync,
    Q: OrderQuery + Send + Sync,
{
    async fn execute(
        &self,
        created_by: Uuid,
        request: CreateTrack,
    ) -> Result<Track, CreateTrackError> {
        let track_id = self.resolve_track_id(&request).await?;

        let new_track = NewTrack {
            order_id: request.order_id,
            track_id,
            initial: TrackStep {
                status: request.status.unwrap_or_default(),
                location: request.location,
                description: request.description,
                updated_by: Some(created_by.to_string()),
                timestamp: Utc::now(),
            },
        };

        match self.repository.create(new_track).await {
            Ok(track) => {
                tracing::info!(
                    track_id = %track.track_id,
                    order_id = %track.order_id,
                    status = %track.current_status,
                    "Track created"
                );
                Ok(track)
            }
            Err(TrackRepositoryError::DuplicateTrackId) => Err(CreateTrackError::DuplicateTrackId),
            Err(e) => Err(CreateTrackError::RepositoryError(e.to_string())),
        }
    }
}
