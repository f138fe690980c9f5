use async_trait::async_trait;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::application::domain::entities::PublicUser;
use crate::auth::application::ports::outgoing::{UserRepository, UserRepositoryError};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SetUserStatusRequest {
    pub is_active: bool,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum SetUserStatusError {
    #[error("User not found")]
    UserNotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Admin toggle between active and inactive. Verification state is untouched.
#[async_trait]
pub trait ISetUserStatusUseCase: Send + Sync {
    async fn execute(
        &self,
        user_id: Uuid,
        is_active: bool,
    ) -> Result<PublicUser, SetUserStatusError>;
}

#[derive(Clone)]
pub struct SetUserStatusUseCase<R>
where
    R: UserRepository + Send + Sync,
{
    repository: R,
}

impl<R> SetUserStatusUseCase<R>
where
    R: UserRepository + Send + Sync,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> ISetUserStatusUseCase for SetUserStatusUseCase<R>
where
    R: UserRepository + Send + Sync,
{
    async fn execute(
        &self,
        user_id: Uuid,
        is_active: bool,
    ) -> Result<PublicUser, SetUserStatusError> {
        self.repository
            .set_active(user_id, is_active)
            .await
            .map(PublicUser::from)
            .map_err(|e| match e {
                UserRepositoryError::UserNotFound => SetUserStatusError::UserNotFound,
                other => SetUserStatusError::DatabaseError(other.to_string()),
            })
    }
}
