mod list_notifications;

pub use list_notifications::*;
