use std::sync::Arc;

use serde::Serialize;

use crate::auth::application::domain::entities::{PublicUser, User};
use crate::auth::application::ports::outgoing::TokenProvider;
use crate::auth::application::use_cases::create_user::{
    CreateUserError, ICreateUserUseCase, SignupRequest,
};
use crate::email::application::ports::outgoing::{UserEmailNotifier, VerificationEmail};
use crate::notification::application::domain::entities::NewNotification;
use crate::notification::application::ports::incoming::use_cases::NotificationDispatcher;

// ============================================================================
// Registration Output
// ============================================================================
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRegistrationOutput {
    pub user: PublicUser,
    pub access_token: String,
    pub refresh_token: String,
    #[serde(skip)]
    pub message: String,
}

// ============================================================================
// Registration Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum UserRegistrationError {
    #[error("User creation failed: {0}")]
    CreateUserFailed(#[from] CreateUserError),

    #[error("Token generation failed: {0}")]
    TokenGenerationFailed(String),
}

// ============================================================================
// User Registration Service (Orchestration Layer)
// ============================================================================

#[derive(Clone)]
pub struct UserRegistrationOrchestrator {
    create_user_use_case: Arc<dyn ICreateUserUseCase + Send + Sync>,
    token_provider: Arc<dyn TokenProvider + Send + Sync>,
    email_service: Arc<dyn UserEmailNotifier + Send + Sync>,
    notifications: Arc<dyn NotificationDispatcher + Send + Sync>,
}

impl UserRegistrationOrchestrator {
    pub fn new(
        create_user_use_case: Arc<dyn ICreateUserUseCase + Send + Sync>,
        token_provider: Arc<dyn TokenProvider + Send + Sync>,
        email_service: Arc<dyn UserEmailNotifier + Send + Sync>,
        notifications: Arc<dyn NotificationDispatcher + Send + Sync>,
    ) -> Self {
        Self {
            create_user_use_case,
            token_provider,
            email_service,
            notifications,
        }
    }

    /// Creates the account and issues tokens. The verification email and the
    /// welcome notification run in the background and never fail the signup.
    pub async fn register_user(
        &self,
        request: SignupRequest,
    ) -> Result<UserRegistrationOutput, UserRegistrationError> {
        let user = self.create_user_use_case.execute(request).await?;

        let tokens = self
            .token_provider
            .issue_pair(user.id, user.role)
            .map_err(|e| UserRegistrationError::TokenGenerationFailed(e.to_string()))?;

        self.spawn_verification_email(&user);
        self.spawn_welcome_notification(&user);

        Ok(UserRegistrationOutput {
            user: PublicUser::from(&user),
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            message: "User created successfully. Please check your email for the verification code."
                .to_string(),
        })
    }

    fn spawn_verification_email(&self, user: &User) {
        let Some(email) = VerificationEmail::for_user(user) else {
            tracing::warn!(user_id = %user.id, "No pending verification code, email skipped");
            return;
        };
        let email_service = self.email_service.clone();
        let user_id = user.id;

        tokio::spawn(async move {
            if let Err(e) = email_service.send_verification_email(email).await {
                tracing::error!(user_id = %user_id, error = %e, "Verification email failed");
            }
        });
    }

    fn spawn_welcome_notification(&self, user: &User) {
        let notifications = self.notifications.clone();
        let welcome = NewNotification::welcome(user.id, &user.name);
        let user_id = user.id;

        tokio::spawn(async move {
            if let Err(e) = notifications.dispatch(welcome).await {
                tracing::warn!(user_id = %user_id, error = %e, "Welcome notification failed");
            }
        });
    }
}
