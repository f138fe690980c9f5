use async_trait::async_trait;
use uuid::Uuid;

use crate::permission::application::domain::entities::{
    Permission, PermissionUpdate, PermissionUpdateError,
};

#[derive(Debug, Clone, thiserror::Error)]
pub enum SetPermissionsError {
    #[error("User not found")]
    UserNotFound,

    #[error(transparent)]
    InvalidUpdate(#[from] PermissionUpdateError),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait SetPermissionsUseCase: Send + Sync {
    async fn execute(
        &self,
        granted_by: Uuid,
        user_id: Uuid,
        update: PermissionUpdate,
    ) -> Result<Permission, SetPermissionsError>;
}
