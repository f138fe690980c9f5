// application/ports/outgoing/user_query.rs
use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::application::domain::entities::{User, UserIdentifier};

#[derive(Debug, Clone, thiserror::Error)]
pub enum UserQueryError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Corrupted user record: {0}")]
    CorruptedRecord(String),
}

#[async_trait]
pub trait UserQuery: Send + Sync {
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<User>, UserQueryError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserQueryError>;
    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, UserQueryError>;

    async fn find_by_identifier(
        &self,
        identifier: &UserIdentifier,
    ) -> Result<Option<User>, UserQueryError> {
        match identifier {
            UserIdentifier::Id(id) => self.find_by_id(*id).await,
            UserIdentifier::Email(email) => self.find_by_email(email).await,
            UserIdentifier::Phone(phone) => self.find_by_phone(phone).await,
        }
    }
}
