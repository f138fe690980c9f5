use async_trait::async_trait;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::application::domain::entities::{
    LoginAction, LoginHistoryEntry, NewLoginHistory,
};
use crate::auth::application::ports::outgoing::login_history_repository::{
    LoginHistoryError, LoginHistoryRepository,
};
use crate::shared::api::{PageRequest, PageResult};

use super::sea_orm_entity::login_histories::{
    ActiveModel as HistoryActiveModel, Column as HistoryColumn, Entity as HistoryEntity,
    Model as HistoryModel,
};

#[derive(Clone, Debug)]
pub struct LoginHistoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl LoginHistoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<HistoryModel> for LoginHistoryEntry {
    fn from(model: HistoryModel) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            phone: model.phone,
            ip: model.ip,
            user_agent: model.user_agent,
            success: model.success,
            failure_reason: model.failure_reason,
            action: LoginAction::from_db(&model.action),
            created_at: model.created_at.with_timezone(&chrono::Utc),
        }
    }
}

#[async_trait]
impl LoginHistoryRepository for LoginHistoryPostgres {
    async fn record(&self, entry: NewLoginHistory) -> Result<(), LoginHistoryError> {
        let row = HistoryActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(entry.user_id),
            phone: Set(entry.phone),
            ip: Set(entry.client.ip),
            user_agent: Set(entry.client.user_agent),
            success: Set(entry.success),
            failure_reason: Set(entry.failure_reason.map(|r| r.code().to_string())),
            action: Set(entry.action.as_str().to_string()),
            created_at: NotSet,
        };

        row.insert(&*self.db)
            .await
            .map_err(|e| LoginHistoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        phone: &str,
        page: PageRequest,
    ) -> Result<PageResult<LoginHistoryEntry>, LoginHistoryError> {
        let owner = Condition::any()
            .add(HistoryColumn::UserId.eq(user_id))
            .add(HistoryColumn::Phone.eq(phone));

        let total = HistoryEntity::find()
            .filter(owner.clone())
            .count(&*self.db)
            .await
            .map_err(|e| LoginHistoryError::DatabaseError(e.to_string()))?;

        let rows = HistoryEntity::find()
            .filter(owner)
            .order_by_desc(HistoryColumn::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&*self.db)
            .await
            .map_err(|e| LoginHistoryError::DatabaseError(e.to_string()))?;

        let items = rows.into_iter().map(LoginHistoryEntry::from).collect();
        Ok(PageResult::new(items, page, total))
    }
}
