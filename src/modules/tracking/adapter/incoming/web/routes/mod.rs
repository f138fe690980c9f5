mod append_track_step;
mod create_track;
mod delete_track;
mod get_track;
mod list_tracks;

pub use append_track_step::*;
pub use create_track::*;
pub use delete_track::*;
pub use get_track::*;
pub use list_tracks::*;
