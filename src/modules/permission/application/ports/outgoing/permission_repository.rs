use async_trait::async_trait;
use uuid::Uuid;

use crate::permission::application::domain::entities::{NewPermission, Permission};

#[derive(Debug, Clone, thiserror::Error)]
pub enum PermissionRepositoryError {
    #[error("Permission set not found")]
    NotFound,

    #[error("User already has a permission set")]
    AlreadyExists,

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Corrupted permission record: {0}")]
    CorruptedRecord(String),
}

#[async_trait]
pub trait PermissionRepository: Send + Sync {
    async fn find_by_user(&self, user_id: Uuid)
        -> Result<Option<Permission>, PermissionRepositoryError>;

    async fn insert(&self, permission: NewPermission)
        -> Result<Permission, PermissionRepositoryError>;

    /// Persists the grant fields of `permission` by id.
    async fn update(&self, permission: Permission)
        -> Result<Permission, PermissionRepositoryError>;
}
