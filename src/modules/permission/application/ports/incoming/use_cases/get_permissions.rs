use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::application::use_cases::signin_history::Requester;
use crate::permission::application::domain::entities::Permission;

#[derive(Debug, Clone, thiserror::Error)]
pub enum GetPermissionsError {
    #[error("No permission set for this user")]
    NotFound,

    #[error("Not allowed to read another user's permissions")]
    Forbidden,

    #[error("Query error: {0}")]
    QueryError(String),
}

#[async_trait]
pub trait GetPermissionsUseCase: Send + Sync {
    async fn execute(
        &self,
        requester: Requester,
        user_id: Uuid,
    ) -> Result<Permission, GetPermissionsError>;
}
