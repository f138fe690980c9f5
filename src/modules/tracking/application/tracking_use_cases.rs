use std::sync::Arc;

use crate::tracking::application::ports::incoming::use_cases::{
    AppendTrackStepUseCase, CreateTrackUseCase, DeleteTrackUseCase, GetTrackUseCase,
    ListTracksUseCase,
};

#[derive(Clone)]
pub struct TrackingUseCases {
    pub create: Arc<dyn CreateTrackUseCase + Send + Sync>,
    pub append_step: Arc<dyn AppendTrackStepUseCase + Send + Sync>,
    pub get_single: Arc<dyn GetTrackUseCase + Send + Sync>,
    pub get_list: Arc<dyn ListTracksUseCase + Send + Sync>,
    pub delete: Arc<dyn DeleteTrackUseCase + Send + Sync>,
}
