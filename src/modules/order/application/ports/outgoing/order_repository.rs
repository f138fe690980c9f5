use async_trait::async_trait;
use uuid::Uuid;

use crate::order::application::domain::entities::{NewOrder, Order};
use crate::order::application::domain::payment_update::PaymentUpdate;

#[derive(Debug, Clone, thiserror::Error)]
pub enum OrderRepositoryError {
    #[error("Order not found")]
    NotFound,

    #[error("Track id already taken")]
    DuplicateTrackId,

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Corrupted order record: {0}")]
    CorruptedRecord(String),
}

#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn create(&self, order: NewOrder) -> Result<Order, OrderRepositoryError>;

    /// Writes only the fields present in `update`. An empty update returns the
    /// stored order untouched.
    async fn update_payment(
        &self,
        order_id: Uuid,
        update: PaymentUpdate,
    ) -> Result<Order, OrderRepositoryError>;
}
