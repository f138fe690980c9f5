use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::tracking::application::domain::entities::{AppendTrackStep, Track};
use crate::tracking::application::ports::incoming::use_cases::{
    AppendTrackStepError, AppendTrackStepUseCase,
};
use crate::tracking::application::ports::outgoing::{TrackRepository, TrackRepositoryError};

pub struct AppendTrackStepService<R>
where
    R: TrackRepository,
{
    repository: R,
}

impl<R> AppendTrackStepService<R>
where
    R: TrackRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> AppendTrackStepUseCase for AppendTrackStepService<R>
where
    R: TrackRepository + Send + Sync,
{
    async fn execute(
        &self,
        caller: Uuid,
        track_id: &str,
        request: AppendTrackStep,
    ) -> Result<Track, AppendTrackStepError> {
        let step = request.into_step(&caller.to_string(), Utc::now());
        let status = step.status;

        match self.repository.append_step(track_id, step).await {
            Ok(track) => {
                tracing::info!(
                    track_id = %track_id,
                    status = %status,
                    updated_by = %caller,
                    steps = track.history.len(),
                    "Tracking step appended"
                );
                if track.reopened_after_close() {
                    tracing::warn!(
                        track_id = %track_id,
                        status = %status,
                        "Step appended after the track was closed"
                    );
                }
                Ok(track)
            }
            Err(TrackRepositoryError::NotFound) => Err(AppendTrackStepError::NotFound),
            Err(e) => Err(AppendTrackStepError::RepositoryError(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracking::application::domain::entities::tests::sample_track;
    use crate::tracking::application::domain::entities::{NewTrack, TrackStatus, TrackStep};
    use mockall::mock;

    mock! {
        pub TrackRepositoryMock {}
        #[async_trait]
        impl TrackRepository for TrackRepositoryMock {
            async fn create(&self, track: NewTrack) -> Result<Track, TrackRepositoryError>;
            async fn append_step(&self, track_id: &str, step: TrackStep) -> Result<Track, TrackRepositoryError>;
            async fn delete(&self, track_id: &str) -> Result<(), TrackRepositoryError>;
        }
    }

    fn request(status: TrackStatus) -> AppendTrackStep {
        AppendTrackStep {
            status,
            description: Some("Handed to courier".into()),
            location: None,
            updated_by: None,
            timestamp: None,
        }
    }

    #[tokio::test]
    async fn appends_and_moves_status() {
        let caller = Uuid::new_v4();
        let mut repo = MockTrackRepositoryMock::new();
        repo.expect_append_step()
            .withf(move |id, step| {
                id == "ZY0000000009"
                    && step.status == TrackStatus::Delivered
                    && step.updated_by.as_deref() == Some(caller.to_string().as_str())
            })
            .returning(|id, step| {
                let mut track = sample_track(id);
                track.current_status = step.status;
                track.history.push(step);
                Ok(track)
            });

        let track = AppendTrackStepService::new(repo)
            .execute(caller, "ZY0000000009", request(TrackStatus::Delivered))
            .await
            .unwrap();

        assert_eq!(track.current_status, TrackStatus::Delivered);
        assert_eq!(track.history.len(), 2);
        assert_eq!(track.latest_step().unwrap().status, TrackStatus::Delivered);
    }

    #[tokio::test]
    async fn closed_track_still_accepts_steps() {
        let mut repo = MockTrackRepositoryMock::new();
        repo.expect_append_step().returning(|id, step| {
            let mut track = sample_track(id);
            let mut delivered = step.clone();
            delivered.status = TrackStatus::Delivered;
            track.history.push(delivered);
            track.current_status = step.status;
            track.history.push(step);
            Ok(track)
        });

        let track = AppendTrackStepService::new(repo)
            .execute(Uuid::new_v4(), "ZY0000000010", request(TrackStatus::InTransit))
            .await
            .unwrap();

        assert_eq!(track.current_status, TrackStatus::InTransit);
        assert!(track.reopened_after_close());
    }

    #[tokio::test]
    async fn unknown_track_is_not_found() {
        let mut repo = MockTrackRepositoryMock::new();
        repo.expect_append_step()
            .returning(|_, _| Err(TrackRepositoryError::NotFound));

        let result = AppendTrackStepService::new(repo)
            .execute(Uuid::new_v4(), "ZY404", request(TrackStatus::InTransit))
            .await;
        assert!(matches!(result, Err(AppendTrackStepError::NotFound)));
    }

    #[tokio::test]
    async fn store_failure_is_repository_error() {
        let mut repo = MockTrackRepositoryMock::new();
        repo.expect_append_step()
            .returning(|_, _| Err(TrackRepositoryError::DatabaseError("lock timeout".into())));

        let result = AppendTrackStepService::new(repo)
            .execute(Uuid::new_v4(), "ZY0000000009", request(TrackStatus::InTransit))
            .await;
        assert!(matches!(result, Err(AppendTrackStepError::RepositoryError(_))));
    }
}
