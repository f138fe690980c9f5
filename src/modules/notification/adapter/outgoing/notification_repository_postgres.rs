use async_trait::async_trait;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::notification::application::domain::entities::{
    NewNotification, Notification, NotificationKind,
};
use crate::notification::application::ports::outgoing::{
    NotificationRepository, NotificationRepositoryError,
};
use crate::shared::api::{PageRequest, PageResult};

use super::sea_orm_entity::notifications::{
    ActiveModel as NotificationActiveModel, Column as NotificationColumn,
    Entity as NotificationEntity, Model as NotificationModel,
};

#[derive(Clone, Debug)]
pub struct NotificationRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl NotificationRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<NotificationModel> for Notification {
    fn from(model: NotificationModel) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            kind: NotificationKind::from_db(&model.kind),
            title: model.title,
            message: model.message,
            is_read: model.is_read,
            created_at: model.created_at.with_timezone(&chrono::Utc),
        }
    }
}

#[async_trait]
impl NotificationRepository for NotificationRepositoryPostgres {
    async fn create(
        &self,
        notification: NewNotification,
    ) -> Result<Notification, NotificationRepositoryError> {
        let active = NotificationActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(notification.user_id),
            kind: Set(notification.kind.as_str().to_string()),
            title: Set(notification.title),
            message: Set(notification.message),
            is_read: Set(false),
            created_at: NotSet,
        };

        let inserted = active
            .insert(&*self.db)
            .await
            .map_err(|e| NotificationRepositoryError::DatabaseError(e.to_string()))?;

        Ok(inserted.into())
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<PageResult<Notification>, NotificationRepositoryError> {
        let total = NotificationEntity::find()
            .filter(NotificationColumn::UserId.eq(user_id))
            .count(&*self.db)
            .await
            .map_err(|e| NotificationRepositoryError::DatabaseError(e.to_string()))?;

        let rows = NotificationEntity::find()
            .filter(NotificationColumn::UserId.eq(user_id))
            .order_by_desc(NotificationColumn::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&*self.db)
            .await
            .map_err(|e| NotificationRepositoryError::DatabaseError(e.to_string()))?;

        Ok(PageResult::new(
            rows.into_iter().map(Notification::from).collect(),
            page,
            total,
        ))
    }
}
