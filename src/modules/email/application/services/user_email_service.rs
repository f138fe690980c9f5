use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

use crate::email::application::ports::outgoing::{
    EmailSender, UserEmailNotificationError, UserEmailNotifier, VerificationEmail,
};

#[derive(Clone)]
pub struct UserEmailService {
    sender: Arc<dyn EmailSender + Send + Sync>,
    app_base_url: String,
}

impl fmt::Debug for UserEmailService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserEmailService")
            .field("sender", &"<dyn EmailSender>")
            .field("app_base_url", &self.app_base_url)
            .finish()
    }
}

impl UserEmailService {
    pub fn new(sender: Arc<dyn EmailSender + Send + Sync>, app_base_url: String) -> Self {
        Self {
            sender,
            app_base_url,
        }
    }

    fn render_verification(&self, email: &VerificationEmail) -> String {
        format!(
            "<p>Hi {name},</p>\
             <p>Your verification code is <strong>{code}</strong>.</p>\
             <p>It expires at {expires} UTC. Enter it at {base}/verify-email.</p>",
            name = email.name,
            code = email.code,
            expires = email.expires_at.format("%Y-%m-%d %H:%M"),
            base = self.app_base_url.trim_end_matches('/'),
        )
    }
}

#[async_trait]
impl UserEmailNotifier for UserEmailService {
    async fn send_verification_email(
        &self,
        email: VerificationEmail,
    ) -> Result<(), UserEmailNotificationError> {
        let body = self.render_verification(&email);

        self.sender
            .send_email(&email.to, "Verify your email address", &body)
            .await
            .map_err(|e| UserEmailNotificationError::EmailSendingFailed(e.to_string()))?;

        tracing::info!(to = %email.to, "Verification email sent");
        Ok(())
    }
}
