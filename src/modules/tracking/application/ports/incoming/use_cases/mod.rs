pub mod append_track_step;
pub mod create_track;
pub mod delete_track;
pub mod get_track;
pub mod list_tracks;

pub use append_track_step::{AppendTrackStepError, AppendTrackStepUseCase};
pub use create_track::{CreateTrack, CreateTrackError, CreateTrackUseCase};
pub use delete_track::{DeleteTrackError, DeleteTrackUseCase};
pub use get_track::{GetTrackError, GetTrackUseCase};
pub use list_tracks::{ListTracksError, ListTracksUseCase};
