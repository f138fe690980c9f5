pub mod order_query;
pub mod order_repository;

pub use order_query::{OrderQuery, OrderQueryError};
pub use order_repository::{OrderRepository, OrderRepositoryError};
