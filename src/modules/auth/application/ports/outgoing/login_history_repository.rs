use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::application::domain::entities::{LoginHistoryEntry, NewLoginHistory};
use crate::shared::api::{PageRequest, PageResult};

#[derive(Debug, Clone, thiserror::Error)]
pub enum LoginHistoryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Write-once log of sign-in attempts and sign-outs.
#[async_trait]
pub trait LoginHistoryRepository: Send + Sync {
    async fn record(&self, entry: NewLoginHistory) -> Result<(), LoginHistoryError>;

    /// Rows owned by the user, or recorded against the user's phone before it resolved.
    async fn list_for_user(
        &self,
        user_id: Uuid,
        phone: &str,
        page: PageRequest,
    ) -> Result<PageResult<LoginHistoryEntry>, LoginHistoryError>;
}
