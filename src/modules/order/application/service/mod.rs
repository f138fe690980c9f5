pub mod create_order_service;
pub mod get_order_service;
pub mod update_payment_service;

pub use create_order_service::CreateOrderService;
pub use get_order_service::GetOrderService;
pub use update_payment_service::UpdatePaymentService;
