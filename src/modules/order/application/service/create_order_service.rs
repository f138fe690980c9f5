use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::notification::application::domain::entities::NewNotification;
use crate::notification::application::ports::incoming::use_cases::NotificationDispatcher;
use crate::order::application::domain::entities::{generate_track_id, NewOrder, Order};
use crate::order::application::ports::incoming::use_cases::{
    CreateOrderError, CreateOrderRequest, CreateOrderUseCase,
};
use crate::order::application::ports::outgoing::{OrderRepository, OrderRepositoryError};

pub const MAX_TRACK_ID_ATTEMPTS: usize = 5;

pub struct CreateOrderService<R>
where
    R: OrderRepository,
{
    repository: R,
    notifications: Arc<dyn NotificationDispatcher + Send + Sync>,
}

impl<R> CreateOrderService<R>
where
    R: OrderRepository,
{
    pub fn new(repository: R, notifications: Arc<dyn NotificationDispatcher + Send + Sync>) -> Self {
        Self {
            repository,
            notifications,
        }
    }
}

#[async_trait]
impl<R> CreateOrderUseCase for CreateOrderService<R>
where
    R: OrderRepository + Send + Sync,
{
    async fn execute(
        &self,
        created_by: Uuid,
        request: CreateOrderRequest,
    ) -> Result<Order, CreateOrderError> {
        let parcel = request.parcel.normalized()?;

        let payment = request.payment.unwrap_or_default();

        for attempt in 1..=MAX_TRACK_ID_ATTEMPTS {
            let new_order = NewOrder {
                track_id: generate_track_id(),
                parcel: parcel.clone(),
                payment: payment.clone(),
                created_by,
            };

            match self.repository.create(new_order).await {
                Ok(order) => {
                    tracing::info!(
                        order_id = %order.id,
                        track_id = %order.track_id,
                        created_by = %created_by,
                        "Order created"
                    );

                    let notifications = Arc::clone(&self.notifications);
                    let notice = NewNotification::order_created(created_by, &order.track_id);
                    tokio::spawn(async move {
                        if let Err(e) = notifications.dispatch(notice).await {
                            tracing::warn!(user_id = %created_by, error = %e, "Order notification failed");
                        }
                    });

                    return Ok(order);
                }
                Err(OrderRepositoryError::DuplicateTrackId) => {
                    tracing::debug!(attempt, "Track id collision, regenerating");
                }
                Err(e) => return Err(CreateOrderError::RepositoryError(e.to_string())),
            }
        }

        tracing::error!(created_by = %created_by, "Track id space exhausted");
        Err(CreateOrderError::TrackIdExhausted(MAX_TRACK_ID_ATTEMPTS))
    }
}
