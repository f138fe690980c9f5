use super::sea_orm_entity::users::{
    Column as UserColumn, Entity as UserEntity, Model as UserModel,
};
use crate::auth::application::domain::entities::{Role, User};
use crate::auth::application::ports::outgoing::user_query::{UserQuery, UserQueryError};
use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone, Debug)]
pub struct UserQueryPostgres {
    db: Arc<DatabaseConnection>,
}

impl UserQueryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn find_one(
        &self,
        column: UserColumn,
        value: &str,
    ) -> Result<Option<User>, UserQueryError> {
        let user = UserEntity::find()
            .filter(column.eq(value))
            .one(&*self.db)
            .await
            .map_err(|e| UserQueryError::DatabaseError(e.to_string()))?;

        user.map(model_to_user).transpose()
    }
}

pub(crate) fn model_to_user(model: UserModel) -> Result<User, UserQueryError> {
    let role: Role = model
        .role
        .parse()
        .map_err(|e: crate::auth::application::domain::entities::UnknownRole| {
            UserQueryError::CorruptedRecord(e.to_string())
        })?;

    Ok(User {
        id: model.id,
        name: model.name,
        phone: model.phone,
        email: model.email,
        password_hash: model.password_hash,
        role,
        is_active: model.is_active,
        is_verified: model.is_verified,
        verification_code: model.verification_code,
        verification_expires_at: model
            .verification_expires_at
            .map(|dt| dt.with_timezone(&chrono::Utc)),
        login_count: model.login_count,
        last_login: model.last_login.map(|dt| dt.with_timezone(&chrono::Utc)),
        created_at: model.created_at.with_timezone(&chrono::Utc),
        updated_at: model.updated_at.with_timezone(&chrono::Utc),
    })
}

#[async_trait]
impl UserQuery for UserQueryPostgres {
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<User>, UserQueryError> {
        let user = UserEntity::find_by_id(user_id)
            .one(&*self.db)
            .await
            .map_err(|e| UserQueryError::DatabaseError(e.to_string()))?;

        user.map(model_to_user).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserQueryError> {
        self.find_one(UserColumn::Email, &email.trim().to_lowercase())
            .await
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, UserQueryError> {
        self.find_one(UserColumn::Phone, phone.trim()).await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::auth::application::domain::entities::UserIdentifier;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase};

    pub(crate) fn create_mock_user_model(id: Uuid) -> UserModel {
        let now = Utc::now();
        UserModel {
            id,
            name: "Test User".to_string(),
            phone: "+8801711000000".to_string(),
            email: "test@example.com".to_string(),
            password_hash: "hashed_password".to_string(),
            role: "user".to_string(),
            is_active: true,
            is_verified: true,
            verification_code: None,
            verification_expires_at: None,
            login_count: 3,
            last_login: Some(now.into()),
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn test_find_by_id_success() {
        let user_id = Uuid::new_v4();
        let mock_user = create_mock_user_model(user_id);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![mock_user.clone()]])
            .into_connection();

        let query = UserQueryPostgres::new(Arc::new(db));
        let user = query.find_by_id(user_id).await.unwrap().unwrap();

        assert_eq!(user.id, user_id);
        assert_eq!(user.email, "test@example.com");
        assert_eq!(user.role, Role::User);
        assert_eq!(user.login_count, 3);
    }

    #[tokio::test]
    async fn test_find_by_id_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<UserModel>::new()])
            .into_connection();

        let query = UserQueryPostgres::new(Arc::new(db));
        let result = query.find_by_id(Uuid::new_v4()).await;

        assert!(result.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_by_id_database_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors(vec![DbErr::Custom("connection timeout".to_string())])
            .into_connection();

        let query = UserQueryPostgres::new(Arc::new(db));
        let result = query.find_by_id(Uuid::new_v4()).await;

        match result.unwrap_err() {
            UserQueryError::DatabaseError(msg) => assert!(msg.contains("connection timeout")),
            other => panic!("Expected DatabaseError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_find_by_identifier_dispatches_on_phone() {
        let mock_user = create_mock_user_model(Uuid::new_v4());

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![mock_user]])
            .into_connection();

        let query = UserQueryPostgres::new(Arc::new(db));
        let identifier = UserIdentifier::Phone("+8801711000000".to_string());
        let user = query.find_by_identifier(&identifier).await.unwrap();

        assert_eq!(user.unwrap().phone, "+8801711000000");
    }

    #[tokio::test]
    async fn test_find_by_email_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<UserModel>::new()])
            .into_connection();

        let query = UserQueryPostgres::new(Arc::new(db));
        let result = query.find_by_email("nobody@example.com").await;

        assert!(result.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unknown_role_is_reported_as_corrupted() {
        let mut mock_user = create_mock_user_model(Uuid::new_v4());
        mock_user.role = "superuser".to_string();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![mock_user]])
            .into_connection();

        let query = UserQueryPostgres::new(Arc::new(db));
        let result = query.find_by_email("test@example.com").await;

        assert!(matches!(result, Err(UserQueryError::CorruptedRecord(_))));
    }
}
