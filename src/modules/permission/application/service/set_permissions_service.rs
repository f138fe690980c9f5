use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::auth::application::ports::outgoing::UserQuery;
use crate::permission::application::domain::entities::{Permission, PermissionUpdate};
use crate::permission::application::ports::incoming::use_cases::{
    SetPermissionsError, SetPermissionsUseCase,
};
use crate::permission::application::ports::outgoing::{
    PermissionRepository, PermissionRepositoryError,
};

/// Upserts a user's permission set.
pub struct SetPermissionsService<R, U>
where
    R: PermissionRepository,
    U: UserQuery,
{
    repository: R,
    users: U,
}

impl<R, U> SetPermissionsService<R, U>
where
    R: PermissionRepository,
    U: UserQuery,
{
    pub fn new(repository: R, users: U) -> Self {
        Self { repository, users }
    }

    async fn update_existing(
        &self,
        current: Permission,
        update: PermissionUpdate,
        granted_by: Uuid,
    ) -> Result<Permission, SetPermissionsError> {
        let next = current.apply(update, granted_by, Utc::now());
        self.repository
            .update(next)
            .await
            .map_err(|e| SetPermissionsError::RepositoryError(e.to_string()))
    }
}

fn repository_error(e: PermissionRepositoryError) -> SetPermissionsError {
    SetPermissionsError::RepositoryError(e.to_string())
}

#[async_trait]
impl<R, U> SetPermissionsUseCase for SetPermissionsService<R, U>
where
    R: PermissionRepository + Send + Sync,
    U: UserQuery + Send + Sync,
{
    async fn execute(
        &self,
        granted_by: Uuid,
        user_id: Uuid,
        update: PermissionUpdate,
    ) -> Result<Permission, SetPermissionsError> {
        let update = update.normalized()?;

        let user = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(|e| SetPermissionsError::RepositoryError(e.to_string()))?;
        if user.is_none() {
            return Err(SetPermissionsError::UserNotFound);
        }

        let saved = match self
            .repository
            .find_by_user(user_id)
            .await
            .map_err(repository_error)?
        {
            Some(current) => self.update_existing(current, update, granted_by).await?,
            None => {
                let new = update.clone().into_new(user_id, granted_by, Utc::now());
                match self.repository.insert(new).await {
                    Ok(created) => created,
                    // Lost a race with a concurrent first grant.
                    Err(PermissionRepositoryError::AlreadyExists) => {
                        let current = self
                            .repository
                            .find_by_user(user_id)
                            .await
                            .map_err(repository_error)?
                            .ok_or(PermissionRepositoryError::NotFound)
                            .map_err(repository_error)?;
                        self.update_existing(current, update, granted_by).await?
                    }
                    Err(e) => return Err(repository_error(e)),
                }
            }
        };

        tracing::info!(
            user_id = %user_id,
            granted_by = %granted_by,
            is_active = saved.is_active,
            keys = saved.permissions.len(),
            "Permissions saved"
        );
        Ok(saved)
    }
}
