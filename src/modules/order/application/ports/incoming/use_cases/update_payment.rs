use async_trait::async_trait;
use uuid::Uuid;

use crate::order::application::domain::entities::Order;
use crate::order::application::domain::payment_update::PaymentUpdate;

#[derive(Debug, Clone, thiserror::Error)]
pub enum UpdatePaymentError {
    #[error("Order not found")]
    NotFound,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait UpdatePaymentUseCase: Send + Sync {
    async fn execute(
        &self,
        order_id: Uuid,
        update: PaymentUpdate,
    ) -> Result<Order, UpdatePaymentError>;
}
