use chrono::{DateTime, Utc};

use crate::auth::application::domain::entities::User;

/// Everything the verification mail needs, detached from the stored user.
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationEmail {
    pub to: String,
    pub name: String,
    pub code: String,
    pub expires_at: DateTime<Utc>,
}

impl VerificationEmail {
    /// `None` when the user holds no pending code.
    pub fn for_user(user: &User) -> Option<Self> {
        let code = user.verification_code.clone()?;
        let expires_at = user.verification_expires_at?;
        Some(Self {
            to: user.email.clone(),
            name: user.name.clone(),
            code,
            expires_at,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UserEmailNotificationError {
    #[error("Email sending failed: {0}")]
    EmailSendingFailed(String),
}

#[async_trait::async_trait]
pub trait UserEmailNotifier: Send + Sync {
    async fn send_verification_email(
        &self,
        email: VerificationEmail,
    ) -> Result<(), UserEmailNotificationError>;
}
