pub mod track_query;
pub mod track_repository;

pub use track_query::{TrackQuery, TrackQueryError};
pub use track_repository::{TrackRepository, TrackRepositoryError};
