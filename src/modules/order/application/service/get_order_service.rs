use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::application::ports::outgoing::UserQuery;
use crate::auth::application::use_cases::signin_history::Requester;
use crate::order::application::domain::entities::Order;
use crate::order::application::ports::incoming::use_cases::{GetOrderError, GetOrderUseCase};
use crate::order::application::ports::outgoing::OrderQuery;

/// Staff see every order; anyone else only orders where their phone is the
/// sender or the receiver.
pub struct GetOrderService<Q, U>
where
    Q: OrderQuery,
    U: UserQuery,
{
    orders: Q,
    users: U,
}

impl<Q, U> GetOrderService<Q, U>
where
    Q: OrderQuery,
    U: UserQuery,
{
    pub fn new(orders: Q, users: U) -> Self {
        Self { orders, users }
    }
}

#[async_trait]
impl<Q, U> GetOrderUseCase for GetOrderService<Q, U>
where
    Q: OrderQuery + Send + Sync,
    U: UserQuery + Send + Sync,
{
    async fn execute(&self, requester: Requester, order_id: Uuid) -> Result<Order, GetOrderError> {
        let order = self
            .orders
            .find_by_id(order_id)
            .await
            .map_err(|e| GetOrderError::QueryError(e.to_string()))?
            .ok_or(GetOrderError::NotFound)?;

        if requester.role.is_staff() {
            return Ok(order);
        }

        let caller = self
            .users
            .find_by_id(requester.user_id)
            .await
            .map_err(|e| GetOrderError::QueryError(e.to_string()))?;

        match caller {
            Some(user) if order.involves_phone(&user.phone) => Ok(order),
            _ => {
                tracing::warn!(
                    user_id = %requester.user_id,
                    order_id = %order_id,
                    "Order read refused"
                );
                Err(GetOrderError::Forbidden)
            }
        }
    }
}
