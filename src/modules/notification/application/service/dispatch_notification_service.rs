use async_trait::async_trait;

use crate::notification::application::domain::entities::{NewNotification, Notification};
use crate::notification::application::ports::incoming::use_cases::{
    DispatchNotificationError, NotificationDispatcher,
};
use crate::notification::application::ports::outgoing::NotificationRepository;

/// Store-backed dispatcher: a notification exists once it is persisted.
pub struct DispatchNotificationService<R>
where
    R: NotificationRepository,
{
    repository: R,
}

impl<R> DispatchNotificationService<R>
where
    R: NotificationRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> NotificationDispatcher for DispatchNotificationService<R>
where
    R: NotificationRepository + Send + Sync,
{
    async fn dispatch(
        &self,
        notification: NewNotification,
    ) -> Result<Notification, DispatchNotificationError> {
        let user_id = notification.user_id;
        let kind = notification.kind;

        let stored = self.repository.create(notification).await?;
        tracing::debug!(user_id = %user_id, kind = %kind, "Notification stored");

        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::application::domain::entities::NotificationKind;
    use crate::notification::application::ports::outgoing::NotificationRepositoryError;
    use crate::shared::api::{PageRequest, PageResult};
    use chrono::Utc;
    use std::sync::{Arc, Mutex};
    use uuid::Uuid;

    /* --------------------------------------------------
     * Mock NotificationRepository
     * -------------------------------------------------- */

    #[derive(Clone, Default)]
    struct MockNotificationRepository {
        fail: bool,
        created: Arc<Mutex<Vec<NewNotification>>>,
    }

    #[async_trait]
    impl NotificationRepository for MockNotificationRepository {
        async fn create(
            &self,
            notification: NewNotification,
        ) -> Result<Notification, NotificationRepositoryError> {
            if self.fail {
                return Err(NotificationRepositoryError::DatabaseError(
                    "insert failed".to_string(),
                ));
            }
            self.created.lock().unwrap().push(notification.clone());
            Ok(Notification {
                id: Uuid::new_v4(),
                user_id: notification.user_id,
                kind: notification.kind,
                title: notification.title,
                message: notification.message,
                is_read: false,
                created_at: Utc::now(),
            })
        }

        async fn list_for_user(
            &self,
            _user_id: Uuid,
            _page: PageRequest,
        ) -> Result<PageResult<Notification>, NotificationRepositoryError> {
            unimplemented!("not used in dispatch tests")
        }
    }

    #[tokio::test]
    async fn dispatch_persists_notification() {
        let repo = MockNotificationRepository::default();
        let service = DispatchNotificationService::new(repo.clone());

        let user_id = Uuid::new_v4();
        let stored = service
            .dispatch(NewNotification::welcome(user_id, "Rina"))
            .await
            .unwrap();

        assert_eq!(stored.user_id, user_id);
        assert_eq!(stored.kind, NotificationKind::Welcome);
        assert!(!stored.is_read);
        assert_eq!(repo.created.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn dispatch_maps_store_failure() {
        let repo = MockNotificationRepository {
            fail: true,
            ..Default::default()
        };
        let service = DispatchNotificationService::new(repo);

        let result = service
            .dispatch(NewNotification::welcome(Uuid::new_v4(), "Rina"))
            .await;

        assert!(matches!(
            result,
            Err(DispatchNotificationError::StoreFailed(_))
        ));
    }
}
