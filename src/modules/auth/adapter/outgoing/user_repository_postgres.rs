use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::application::domain::entities::User;
use crate::auth::application::ports::outgoing::user_repository::{
    NewUser, UserRepository, UserRepositoryError,
};
use crate::shared::infrastructure::is_unique_violation;

use super::sea_orm_entity::users::{
    ActiveModel as UserActiveModel, Column as UserColumn, Entity as UserEntity,
    Model as UserModel,
};
use super::user_query_postgres::model_to_user;

#[derive(Clone, Debug)]
pub struct UserRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl UserRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn to_user(model: UserModel) -> Result<User, UserRepositoryError> {
        model_to_user(model).map_err(|e| UserRepositoryError::DatabaseError(e.to_string()))
    }

    async fn load(&self, user_id: Uuid) -> Result<UserModel, UserRepositoryError> {
        UserEntity::find_by_id(user_id)
            .one(&*self.db)
            .await
            .map_err(|e| UserRepositoryError::DatabaseError(e.to_string()))?
            .ok_or(UserRepositoryError::UserNotFound)
    }
}

#[async_trait]
impl UserRepository for UserRepositoryPostgres {
    async fn create_user(&self, user: NewUser) -> Result<User, UserRepositoryError> {
        let active_user = UserActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(user.name),
            phone: Set(user.phone),
            email: Set(user.email.to_lowercase()),
            password_hash: Set(user.password_hash),
            role: Set(user.role.as_str().to_string()),
            is_active: Set(true),
            is_verified: Set(false),
            verification_code: Set(Some(user.verification.code)),
            verification_expires_at: Set(Some(user.verification.expires_at.into())),
            login_count: Set(0),
            last_login: Set(None),
            created_at: NotSet,
            updated_at: NotSet,
        };

        let inserted = active_user.insert(&*self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                return UserRepositoryError::UserAlreadyExists;
            }
            UserRepositoryError::DatabaseError(e.to_string())
        })?;

        Self::to_user(inserted)
    }

    async fn record_login(
        &self,
        user_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<(), UserRepositoryError> {
        let result = UserEntity::update_many()
            .col_expr(
                UserColumn::LoginCount,
                Expr::col(UserColumn::LoginCount).add(1),
            )
            .col_expr(UserColumn::LastLogin, Expr::value(at.fixed_offset()))
            .filter(UserColumn::Id.eq(user_id))
            .exec(&*self.db)
            .await
            .map_err(|e| UserRepositoryError::DatabaseError(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(UserRepositoryError::UserNotFound);
        }
        Ok(())
    }

    async fn touch_last_login(
        &self,
        user_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<(), UserRepositoryError> {
        let result = UserEntity::update_many()
            .col_expr(UserColumn::LastLogin, Expr::value(at.fixed_offset()))
            .filter(UserColumn::Id.eq(user_id))
            .exec(&*self.db)
            .await
            .map_err(|e| UserRepositoryError::DatabaseError(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(UserRepositoryError::UserNotFound);
        }
        Ok(())
    }

    async fn mark_verified(&self, user_id: Uuid) -> Result<User, UserRepositoryError> {
        let user = self.load(user_id).await?;

        let mut active_user: UserActiveModel = user.into();
        active_user.is_verified = Set(true);
        active_user.verification_code = Set(None);
        active_user.verification_expires_at = Set(None);

        let updated = active_user
            .update(&*self.db)
            .await
            .map_err(|e| UserRepositoryError::DatabaseError(e.to_string()))?;

        Self::to_user(updated)
    }

    async fn set_active(
        &self,
        user_id: Uuid,
        is_active: bool,
    ) -> Result<User, UserRepositoryError> {
        let user = self.load(user_id).await?;

        let mut active_user: UserActiveModel = user.into();
        active_user.is_active = Set(is_active);

        let updated = active_user
            .update(&*self.db)
            .await
            .map_err(|e| UserRepositoryError::DatabaseError(e.to_string()))?;

        Self::to_user(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::adapter::outgoing::user_query_postgres::tests::create_mock_user_model;
    use crate::auth::application::domain::entities::{Role, VerificationCode};
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult};

    fn create_new_user() -> NewUser {
        NewUser {
            name: "Test User".to_string(),
            phone: "+8801711000000".to_string(),
            email: "Test@Example.com".to_string(),
            password_hash: "hashed_password".to_string(),
            role: Role::User,
            verification: VerificationCode::generate(Utc::now()),
        }
    }

    #[tokio::test]
    async fn test_create_user_success() {
        let mut model = create_mock_user_model(Uuid::new_v4());
        model.is_verified = false;
        model.login_count = 0;
        model.verification_code = Some("123456".to_string());

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model.clone()]])
            .into_connection();

        let repository = UserRepositoryPostgres::new(Arc::new(db));
        let user = repository.create_user(create_new_user()).await.unwrap();

        assert_eq!(user.email, "test@example.com");
        assert!(!user.is_verified);
        assert_eq!(user.verification_code.as_deref(), Some("123456"));
    }

    #[tokio::test]
    async fn test_create_user_duplicate_key_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors(vec![DbErr::Custom(
                "duplicate key value violates unique constraint \"users_email_key\"".to_string(),
            )])
            .into_connection();

        let repository = UserRepositoryPostgres::new(Arc::new(db));
        let result = repository.create_user(create_new_user()).await;

        assert!(matches!(result, Err(UserRepositoryError::UserAlreadyExists)));
    }

    #[tokio::test]
    async fn test_record_login_updates_single_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let repository = UserRepositoryPostgres::new(Arc::new(db));
        let result = repository.record_login(Uuid::new_v4(), Utc::now()).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_record_login_unknown_user() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repository = UserRepositoryPostgres::new(Arc::new(db));
        let result = repository.record_login(Uuid::new_v4(), Utc::now()).await;

        assert!(matches!(result, Err(UserRepositoryError::UserNotFound)));
    }

    #[tokio::test]
    async fn test_record_login_increments_in_sql() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();
        let db = Arc::new(db);

        let repository = UserRepositoryPostgres::new(db.clone());
        repository
            .record_login(Uuid::new_v4(), Utc::now())
            .await
            .unwrap();
        drop(repository);

        let log = Arc::try_unwrap(db).unwrap().into_transaction_log();
        let sql = &log[0].statements()[0].sql;
        assert!(sql.contains(r#""login_count" = "login_count" + $1"#), "{}", sql);
    }

    #[tokio::test]
    async fn test_mark_verified_clears_code() {
        let user_id = Uuid::new_v4();
        let mut pending = create_mock_user_model(user_id);
        pending.is_verified = false;
        pending.verification_code = Some("123456".to_string());

        let mut verified = pending.clone();
        verified.is_verified = true;
        verified.verification_code = None;
        verified.verification_expires_at = None;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![pending]])
            .append_query_results(vec![vec![verified]])
            .into_connection();

        let repository = UserRepositoryPostgres::new(Arc::new(db));
        let user = repository.mark_verified(user_id).await.unwrap();

        assert!(user.is_verified);
        assert!(user.verification_code.is_none());
    }

    #[tokio::test]
    async fn test_set_active_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<UserModel>::new()])
            .into_connection();

        let repository = UserRepositoryPostgres::new(Arc::new(db));
        let result = repository.set_active(Uuid::new_v4(), false).await;

        assert!(matches!(result, Err(UserRepositoryError::UserNotFound)));
    }

    #[tokio::test]
    async fn test_set_active_deactivates() {
        let user_id = Uuid::new_v4();
        let active = create_mock_user_model(user_id);
        let mut inactive = active.clone();
        inactive.is_active = false;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![active]])
            .append_query_results(vec![vec![inactive]])
            .into_connection();

        let repository = UserRepositoryPostgres::new(Arc::new(db));
        let user = repository.set_active(user_id, false).await.unwrap();

        assert!(!user.is_active);
    }
}
