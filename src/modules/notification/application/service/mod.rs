pub mod dispatch_notification_service;
pub mod list_notifications_service;

pub use dispatch_notification_service::DispatchNotificationService;
pub use list_notifications_service::ListNotificationsService;
