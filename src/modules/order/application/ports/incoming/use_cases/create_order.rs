use async_trait::async_trait;
use serde::Deserialize;
use uuid::Uuid;

use crate::order::application::domain::entities::{Order, Parcel, ParcelError, Payment};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderRequest {
    pub parcel: Parcel,
    #[serde(default)]
    pub payment: Option<Payment>,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum CreateOrderError {
    #[error("Invalid parcel: {0}")]
    InvalidParcel(#[from] ParcelError),

    #[error("Could not allocate a unique track id after {0} attempts")]
    TrackIdExhausted(usize),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait CreateOrderUseCase: Send + Sync {
    async fn execute(
        &self,
        created_by: Uuid,
        request: CreateOrderRequest,
    ) -> Result<Order, CreateOrderError>;
}
