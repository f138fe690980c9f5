pub mod create_order;
pub mod get_order;
pub mod update_payment;

pub use create_order::{CreateOrderError, CreateOrderRequest, CreateOrderUseCase};
pub use get_order::{GetOrderError, GetOrderUseCase};
pub use update_payment::{UpdatePaymentError, UpdatePaymentUseCase};
