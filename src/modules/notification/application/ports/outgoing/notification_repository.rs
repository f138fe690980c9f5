use async_trait::async_trait;
use uuid::Uuid;

use crate::notification::application::domain::entities::{NewNotification, Notification};
use crate::shared::api::{PageRequest, PageResult};

#[derive(Debug, Clone, thiserror::Error)]
pub enum NotificationRepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn create(
        &self,
        notification: NewNotification,
    ) -> Result<Notification, NotificationRepositoryError>;

    /// Newest first.
    async fn list_for_user(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<PageResult<Notification>, NotificationRepositoryError>;
}
