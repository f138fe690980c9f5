use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::application::use_cases::signin_history::Requester;
use crate::order::application::domain::entities::Order;

#[derive(Debug, Clone, thiserror::Error)]
pub enum GetOrderError {
    #[error("Order not found")]
    NotFound,

    #[error("Not a party to this order")]
    Forbidden,

    #[error("Query error: {0}")]
    QueryError(String),
}

#[async_trait]
pub trait GetOrderUseCase: Send + Sync {
    async fn execute(&self, requester: Requester, order_id: Uuid) -> Result<Order, GetOrderError>;
}
