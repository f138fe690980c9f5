pub mod analytics;
pub mod auth;
pub mod email;
pub mod notification;
pub mod order;
pub mod permission;
pub mod tracking;
