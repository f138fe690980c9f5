use std::sync::Arc;

use crate::auth::application::domain::entities::{User, UserIdentifier};
use crate::auth::application::ports::outgoing::user_query::{UserQuery, UserQueryError};

#[derive(Debug, Clone, thiserror::Error)]
pub enum ResolveUserError {
    #[error("User not found")]
    NotFound,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

/// Turns a parsed identifier into the stored user.
#[derive(Clone)]
pub struct UserIdentityResolver {
    user_query: Arc<dyn UserQuery + Send + Sync>,
}

impl UserIdentityResolver {
    pub fn new(user_query: Arc<dyn UserQuery + Send + Sync>) -> Self {
        Self { user_query }
    }

    pub async fn resolve(&self, identifier: &UserIdentifier) -> Result<User, ResolveUserError> {
        match self.user_query.find_by_identifier(identifier).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => Err(ResolveUserError::NotFound),
            Err(UserQueryError::DatabaseError(msg)) | Err(UserQueryError::CorruptedRecord(msg)) => {
                Err(ResolveUserError::RepositoryError(msg))
            }
        }
    }
}
