pub mod entities;
pub mod payment_update;
