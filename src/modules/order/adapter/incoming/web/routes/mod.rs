mod create_order;
mod get_order;
mod update_payment;

pub use create_order::*;
pub use get_order::*;
pub use update_payment::*;
