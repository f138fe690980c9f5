use async_trait::async_trait;
use uuid::Uuid;

use crate::notification::application::domain::entities::Notification;
use crate::notification::application::ports::outgoing::NotificationRepositoryError;
use crate::shared::api::{PageRequest, PageResult};

#[derive(Debug, Clone, thiserror::Error)]
pub enum ListNotificationsError {
    #[error("Query failed: {0}")]
    QueryFailed(String),
}

impl From<NotificationRepositoryError> for ListNotificationsError {
    fn from(err: NotificationRepositoryError) -> Self {
        match err {
            NotificationRepositoryError::DatabaseError(msg) => {
                ListNotificationsError::QueryFailed(msg)
            }
        }
    }
}

#[async_trait]
pub trait ListNotificationsUseCase: Send + Sync {
    async fn execute(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<PageResult<Notification>, ListNotificationsError>;
}
