pub mod sea_orm_entity;
pub mod track_query_postgres;
pub mod track_repository_postgres;

pub use track_query_postgres::TrackQueryPostgres;
pub use track_repository_postgres::TrackRepositoryPostgres;
