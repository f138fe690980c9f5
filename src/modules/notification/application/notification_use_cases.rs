use std::sync::Arc;

use crate::notification::application::ports::incoming::use_cases::{
    ListNotificationsUseCase, NotificationDispatcher,
};

#[derive(Clone)]
pub struct NotificationUseCases {
    pub dispatcher: Arc<dyn NotificationDispatcher + Send + Sync>,
    pub list_mine: Arc<dyn ListNotificationsUseCase + Send + Sync>,
}
