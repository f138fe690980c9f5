use std::sync::Arc;

use crate::order::application::ports::incoming::use_cases::{
    CreateOrderUseCase, GetOrderUseCase, UpdatePaymentUseCase,
};

#[derive(Clone)]
pub struct OrderUseCases {
    pub create: Arc<dyn CreateOrderUseCase + Send + Sync>,
    pub get_single: Arc<dyn GetOrderUseCase + Send + Sync>,
    pub update_payment: Arc<dyn UpdatePaymentUseCase + Send + Sync>,
}
