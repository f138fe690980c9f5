use async_trait::async_trait;

use crate::notification::application::domain::entities::{NewNotification, Notification};
use crate::notification::application::ports::outgoing::NotificationRepositoryError;

#[derive(Debug, Clone, thiserror::Error)]
pub enum DispatchNotificationError {
    #[error("Notification could not be stored: {0}")]
    StoreFailed(String),
}

impl From<NotificationRepositoryError> for DispatchNotificationError {
    fn from(err: NotificationRepositoryError) -> Self {
        match err {
            NotificationRepositoryError::DatabaseError(msg) => {
                DispatchNotificationError::StoreFailed(msg)
            }
        }
    }
}

/// Delivers an in-app notification. Callers treat it as best effort.
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    async fn dispatch(
        &self,
        notification: NewNotification,
    ) -> Result<Notification, DispatchNotificationError>;
}
