pub mod append_track_step_service;
pub mod create_track_service;
pub mod delete_track_service;
pub mod get_track_service;
pub mod list_tracks_service;

pub use append_track_step_service::AppendTrackStepService;
pub use create_track_service::CreateTrackService;
pub use delete_track_service::DeleteTrackService;
pub use get_track_service::GetTrackService;
pub use list_tracks_service::ListTracksService;
