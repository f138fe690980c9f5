use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::permission::application::domain::entities::{NewPermission, Permission};
use crate::permission::application::ports::outgoing::{
    PermissionRepository, PermissionRepositoryError,
};
use crate::shared::infrastructure::is_unique_violation;

use super::sea_orm_entity::user_permissions::{
    ActiveModel as PermissionActiveModel, Column as PermissionColumn,
    Entity as PermissionEntity, Model as PermissionModel,
};

#[derive(Clone, Debug)]
pub struct PermissionRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl PermissionRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn model_to_permission(model: PermissionModel) -> Result<Permission, PermissionRepositoryError> {
    let permissions: Vec<String> = serde_json::from_value(model.permissions).map_err(|e| {
        PermissionRepositoryError::CorruptedRecord(format!("permissions of {}: {}", model.id, e))
    })?;

    Ok(Permission {
        id: model.id,
        user_id: model.user_id,
        permissions,
        granted_by: model.granted_by,
        granted_at: model.granted_at.with_timezone(&Utc),
        revoked_at: model.revoked_at.map(|t| t.with_timezone(&Utc)),
        is_active: model.is_active,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    })
}

fn keys_to_json(keys: &[String]) -> serde_json::Value {
    serde_json::Value::Array(
        keys.iter()
            .map(|k| serde_json::Value::String(k.clone()))
            .collect(),
    )
}

#[async_trait]
impl PermissionRepository for PermissionRepositoryPostgres {
    async fn find_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<Permission>, PermissionRepositoryError> {
        PermissionEntity::find()
            .filter(PermissionColumn::UserId.eq(user_id))
            .one(&*self.db)
            .await
            .map_err(|e| PermissionRepositoryError::DatabaseError(e.to_string()))?
            .map(model_to_permission)
            .transpose()
    }

    async fn insert(
        &self,
        permission: NewPermission,
    ) -> Result<Permission, PermissionRepositoryError> {
        let active = PermissionActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(permission.user_id),
            permissions: Set(keys_to_json(&permission.permissions)),
            granted_by: Set(Some(permission.granted_by)),
            granted_at: Set(permission.granted_at.fixed_offset()),
            revoked_at: Set(None),
            is_active: Set(permission.is_active),
            created_at: NotSet,
            updated_at: NotSet,
        };

        let inserted = active.insert(&*self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                return PermissionRepositoryError::AlreadyExists;
            }
            PermissionRepositoryError::DatabaseError(e.to_string())
        })?;

        model_to_permission(inserted)
    }

    async fn update(
        &self,
        permission: Permission,
    ) -> Result<Permission, PermissionRepositoryError> {
        let active = PermissionActiveModel {
            id: Set(permission.id),
            user_id: NotSet,
            permissions: Set(keys_to_json(&permission.permissions)),
            granted_by: Set(permission.granted_by),
            granted_at: Set(permission.granted_at.fixed_offset()),
            revoked_at: Set(permission.revoked_at.map(|t| t.fixed_offset())),
            is_active: Set(permission.is_active),
            created_at: NotSet,
            updated_at: Set(Utc::now().fixed_offset()),
        };

        let updated = active.update(&*self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => PermissionRepositoryError::NotFound,
            other => PermissionRepositoryError::DatabaseError(other.to_string()),
        })?;

        model_to_permission(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permission::application::domain::entities::tests::sample_permission;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn model_for(user_id: Uuid, keys: serde_json::Value) -> PermissionModel {
        let now = Utc::now().fixed_offset();
        PermissionModel {
            id: Uuid::new_v4(),
            user_id,
            permissions: keys,
            granted_by: None,
            granted_at: now,
            revoked_at: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_find_by_user_maps_keys() {
        let user_id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model_for(
                user_id,
                serde_json::json!(["orders:read", "tracks:write"]),
            )]])
            .into_connection();

        let found = PermissionRepositoryPostgres::new(Arc::new(db))
            .find_by_user(user_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.permissions, vec!["orders:read", "tracks:write"]);
    }

    #[tokio::test]
    async fn test_find_by_user_corrupted_keys() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model_for(
                Uuid::new_v4(),
                serde_json::json!({ "orders": true }),
            )]])
            .into_connection();

        let result = PermissionRepositoryPostgres::new(Arc::new(db))
            .find_by_user(Uuid::new_v4())
            .await;
        assert!(matches!(
            result,
            Err(PermissionRepositoryError::CorruptedRecord(_))
        ));
    }

    #[tokio::test]
    async fn test_insert_unique_violation() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors(vec![DbErr::Custom(
                "duplicate key value violates unique constraint \"user_permissions_user_id_key\""
                    .to_string(),
            )])
            .into_connection();

        let new = NewPermission {
            user_id: Uuid::new_v4(),
            permissions: vec!["orders:read".into()],
            granted_by: Uuid::new_v4(),
            granted_at: Utc::now(),
            is_active: true,
        };
        let result = PermissionRepositoryPostgres::new(Arc::new(db))
            .insert(new)
            .await;
        assert!(matches!(result, Err(PermissionRepositoryError::AlreadyExists)));
    }

    #[tokio::test]
    async fn test_update_writes_revocation() {
        let user_id = Uuid::new_v4();
        let mut permission = sample_permission(user_id);
        permission.is_active = false;
        permission.revoked_at = Some(Utc::now());

        let mut stored = model_for(user_id, serde_json::json!(["tracks:write"]));
        stored.id = permission.id;
        stored.is_active = false;
        stored.revoked_at = permission.revoked_at.map(|t| t.fixed_offset());

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results(vec![vec![stored]])
                .into_connection(),
        );

        let saved = PermissionRepositoryPostgres::new(db.clone())
            .update(permission)
            .await
            .unwrap();
        assert!(!saved.is_active);
        assert!(saved.revoked_at.is_some());

        let log = Arc::try_unwrap(db).unwrap().into_transaction_log();
        let sql = &log[0].statements()[0].sql;
        let set_clause = sql.split(" WHERE ").next().unwrap();
        assert!(set_clause.contains(r#""revoked_at""#), "{}", sql);
        assert!(!set_clause.contains(r#""user_id""#), "{}", sql);
    }
}
