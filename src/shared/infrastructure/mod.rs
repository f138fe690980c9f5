pub mod cors;
pub mod database;

pub use database::{is_unique_violation, Database};
