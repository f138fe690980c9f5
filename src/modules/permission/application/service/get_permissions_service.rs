use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::application::use_cases::signin_history::Requester;
use crate::permission::application::domain::entities::Permission;
use crate::permission::application::ports::incoming::use_cases::{
    GetPermissionsError, GetPermissionsUseCase,
};
use crate::permission::application::ports::outgoing::PermissionRepository;

pub struct GetPermissionsService<R>
where
    R: PermissionRepository,
{
    repository: R,
}

impl<R> GetPermissionsService<R>
where
    R: PermissionRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> GetPermissionsUseCase for GetPermissionsService<R>
where
    R: PermissionRepository + Send + Sync,
{
    async fn execute(
        &self,
        requester: Requester,
        user_id: Uuid,
    ) -> Result<Permission, GetPermissionsError> {
        if requester.user_id != user_id && !requester.role.is_admin() {
            tracing::warn!(
                requester = %requester.user_id,
                target = %user_id,
                "Permission read refused"
            );
            return Err(GetPermissionsError::Forbidden);
        }

        self.repository
            .find_by_user(user_id)
            .await
            .map_err(|e| GetPermissionsError::QueryError(e.to_string()))?
            .ok_or(GetPermissionsError::NotFound)
    }
}
