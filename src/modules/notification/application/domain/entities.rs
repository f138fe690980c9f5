use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Welcome,
    Order,
    Security,
    System,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Welcome => "welcome",
            NotificationKind::Order => "order",
            NotificationKind::Security => "security",
            NotificationKind::System => "system",
        }
    }

    /// Unknown values read back from the store fall into `System`.
    pub fn from_db(value: &str) -> Self {
        match value {
            "welcome" => NotificationKind::Welcome,
            "order" => NotificationKind::Order,
            "security" => NotificationKind::Security,
            _ => NotificationKind::System,
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotification {
    pub user_id: Uuid,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
}

impl NewNotification {
    pub fn welcome(user_id: Uuid, name: &str) -> Self {
        Self {
            user_id,
            kind: NotificationKind::Welcome,
            title: "Welcome aboard".to_string(),
            message: format!(
                "Hi {}, your account is ready. Verify your email to start shipping.",
                name
            ),
        }
    }

    pub fn order_created(user_id: Uuid, track_id: &str) -> Self {
        Self {
            user_id,
            kind: NotificationKind::Order,
            title: "Order placed".to_string(),
            message: format!("Your order is booked. Track it with {}.", track_id),
        }
    }
}
