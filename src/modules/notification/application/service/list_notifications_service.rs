use async_trait::async_trait;
use uuid::Uuid;

use crate::notification::application::domain::entities::Notification;
use crate::notification::application::ports::incoming::use_cases::{
    ListNotificationsError, ListNotificationsUseCase,
};
use crate::notification::application::ports::outgoing::NotificationRepository;
use crate::shared::api::{PageRequest, PageResult};

pub struct ListNotificationsService<R>
where
    R: NotificationRepository,
{
    repository: R,
}

impl<R> ListNotificationsService<R>
where
    R: NotificationRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> ListNotificationsUseCase for ListNotificationsService<R>
where
    R: NotificationRepository + Send + Sync,
{
    async fn execute(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<PageResult<Notification>, ListNotificationsError> {
        self.repository
            .list_for_user(user_id, page)
            .await
            .map_err(ListNotificationsError::from)
    }
}
