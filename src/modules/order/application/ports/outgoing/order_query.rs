use async_trait::async_trait;
use uuid::Uuid;

use crate::order::application::domain::entities::Order;

#[derive(Debug, Clone, thiserror::Error)]
pub enum OrderQueryError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Corrupted order record: {0}")]
    CorruptedRecord(String),
}

#[async_trait]
pub trait OrderQuery: Send + Sync {
    async fn find_by_id(&self, order_id: Uuid) -> Result<Option<Order>, OrderQueryError>;
}
