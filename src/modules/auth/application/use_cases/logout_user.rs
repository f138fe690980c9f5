use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use crate::auth::application::domain::entities::{ClientInfo, NewLoginHistory};
use crate::auth::application::ports::outgoing::{LoginHistoryRepository, UserQuery};

#[derive(Debug, Clone, thiserror::Error)]
pub enum LogoutError {
    #[error("User not found")]
    UserNotFound,

    #[error("Query error: {0}")]
    QueryError(String),

    #[error("History write failed: {0}")]
    HistoryError(String),
}

// Tokens stay valid until they expire; signing out only records the event.
#[async_trait]
pub trait ILogoutUseCase: Send + Sync {
    async fn execute(&self, user_id: Uuid, client: ClientInfo) -> Result<(), LogoutError>;
}

#[derive(Clone)]
pub struct LogoutUseCase<Q, L>
where
    Q: UserQuery + Send + Sync,
    L: LoginHistoryRepository + Send + Sync,
{
    query: Q,
    history: L,
}

impl<Q, L> LogoutUseCase<Q, L>
where
    Q: UserQuery + Send + Sync,
    L: LoginHistoryRepository + Send + Sync,
{
    pub fn new(query: Q, history: L) -> Self {
        Self { query, history }
    }
}

#[async_trait]
impl<Q, L> ILogoutUseCase for LogoutUseCase<Q, L>
where
    Q: UserQuery + Send + Sync,
    L: LoginHistoryRepository + Send + Sync,
{
    async fn execute(&self, user_id: Uuid, client: ClientInfo) -> Result<(), LogoutError> {
        let user = self
            .query
            .find_by_id(user_id)
            .await
            .map_err(|e| LogoutError::QueryError(e.to_string()))?
            .ok_or(LogoutError::UserNotFound)?;

        self.history
            .record(NewLoginHistory::logout(&user, client))
            .await
            .map_err(|e| LogoutError::HistoryError(e.to_string()))?;

        info!(user_id = %user.id, "User signed out");
        Ok(())
    }
}
