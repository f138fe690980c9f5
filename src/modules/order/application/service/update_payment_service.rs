use async_trait::async_trait;
use uuid::Uuid;

use crate::order::application::domain::entities::Order;
use crate::order::application::domain::payment_update::PaymentUpdate;
use crate::order::application::ports::incoming::use_cases::{
    UpdatePaymentError, UpdatePaymentUseCase,
};
use crate::order::application::ports::outgoing::{OrderRepository, OrderRepositoryError};

pub struct UpdatePaymentService<R>
where
    R: OrderRepository,
{
    repository: R,
}

impl<R> UpdatePaymentService<R>
where
    R: OrderRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> UpdatePaymentUseCase for UpdatePaymentService<R>
where
    R: OrderRepository + Send + Sync,
{
    async fn execute(
        &self,
        order_id: Uuid,
        update: PaymentUpdate,
    ) -> Result<Order, UpdatePaymentError> {
        match self.repository.update_payment(order_id, update).await {
            Ok(order) => {
                tracing::info!(order_id = %order_id, "Payment updated");
                Ok(order)
            }
            Err(OrderRepositoryError::NotFound) => Err(UpdatePaymentError::NotFound),
            Err(e) => Err(UpdatePaymentError::RepositoryError(e.to_string())),
        }
    }
}
