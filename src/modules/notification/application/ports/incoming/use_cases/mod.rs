pub mod dispatch_notification;
pub mod list_notifications;

pub use dispatch_notification::{DispatchNotificationError, NotificationDispatcher};
pub use list_notifications::{ListNotificationsError, ListNotificationsUseCase};
