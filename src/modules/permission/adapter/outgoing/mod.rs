pub mod permission_repository_postgres;
pub mod sea_orm_entity;

pub use permission_repository_postgres::PermissionRepositoryPostgres;
