use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;

use crate::auth::application::domain::entities::{
    ClientInfo, IdentifierError, LoginFailureReason, NewLoginHistory, PublicUser, UserIdentifier,
};
use crate::auth::application::ports::outgoing::{
    LoginHistoryRepository, PasswordHasher, TokenProvider, UserQuery, UserRepository,
};

// ========================= Signin Request =========================
/// Validated signin request. The identifier is an email or a phone number.
#[derive(Debug, Clone)]
pub struct LoginRequest {
    identifier: UserIdentifier,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginRequestError {
    #[error("Email or phone is required")]
    MissingIdentifier,

    #[error("Identifier must be an email address or a phone number")]
    InvalidIdentifier,

    #[error("Password cannot be empty")]
    EmptyPassword,
}

impl LoginRequest {
    pub fn new(identifier: &str, password: String) -> Result<Self, LoginRequestError> {
        let identifier = match UserIdentifier::parse(identifier) {
            Ok(id @ (UserIdentifier::Email(_) | UserIdentifier::Phone(_))) => id,
            Ok(UserIdentifier::Id(_)) => return Err(LoginRequestError::InvalidIdentifier),
            Err(IdentifierError::Empty) => return Err(LoginRequestError::MissingIdentifier),
            Err(_) => return Err(LoginRequestError::InvalidIdentifier),
        };

        if password.trim().is_empty() {
            return Err(LoginRequestError::EmptyPassword);
        }

        Ok(Self {
            identifier,
            password,
        })
    }

    pub fn identifier(&self) -> &UserIdentifier {
        &self.identifier
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl<'de> Deserialize<'de> for LoginRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct LoginRequestHelper {
            identifier: Option<String>,
            email: Option<String>,
            phone: Option<String>,
            password: String,
        }

        let helper = LoginRequestHelper::deserialize(deserializer)?;
        let identifier = helper
            .identifier
            .or(helper.email)
            .or(helper.phone)
            .unwrap_or_default();

        LoginRequest::new(&identifier, helper.password).map_err(serde::de::Error::custom)
    }
}

// ====================== Login Error =============================
#[derive(Debug, Clone, thiserror::Error)]
pub enum LoginError {
    #[error("User not found")]
    UserNotFound,

    #[error("Account is inactive")]
    AccountInactive,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password verification failed: {0}")]
    PasswordVerificationFailed(String),

    #[error("Token generation failed: {0}")]
    TokenGenerationFailed(String),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error("Login bookkeeping failed: {0}")]
    BookkeepingFailed(String),
}

// ============================ Login Response =================================
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginUserResponse {
    pub user: PublicUser,
    pub access_token: String,
    pub refresh_token: String,
}

// ============================ Login User Use Case =============================
#[async_trait]
pub trait ILoginUserUseCase: Send + Sync {
    async fn execute(
        &self,
        request: LoginRequest,
        client: ClientInfo,
    ) -> Result<LoginUserResponse, LoginError>;
}

#[derive(Clone)]
pub struct LoginUserUseCase<Q, R, L>
where
    Q: UserQuery + Send + Sync,
    R: UserRepository + Send + Sync,
    L: LoginHistoryRepository + Send + Sync,
{
    query: Q,
    repository: R,
    history: L,
    password_hasher: Arc<dyn PasswordHasher + Send + Sync>,
    token_provider: Arc<dyn TokenProvider + Send + Sync>,
}

impl<Q, R, L> LoginUserUseCase<Q, R, L>
where
    Q: UserQuery + Send + Sync,
    R: UserRepository + Send + Sync,
    L: LoginHistoryRepository + Send + Sync,
{
    pub fn new(
        query: Q,
        repository: R,
        history: L,
        password_hasher: Arc<dyn PasswordHasher + Send + Sync>,
        token_provider: Arc<dyn TokenProvider + Send + Sync>,
    ) -> Self {
        Self {
            query,
            repository,
            history,
            password_hasher,
            token_provider,
        }
    }

    async fn record(&self, entry: NewLoginHistory) -> Result<(), LoginError> {
        self.history
            .record(entry)
            .await
            .map_err(|e| LoginError::BookkeepingFailed(e.to_string()))
    }
}

#[async_trait]
impl<Q, R, L> ILoginUserUseCase for LoginUserUseCase<Q, R, L>
where
    Q: UserQuery + Send + Sync,
    R: UserRepository + Send + Sync,
    L: LoginHistoryRepository + Send + Sync,
{
    async fn execute(
        &self,
        request: LoginRequest,
        client: ClientInfo,
    ) -> Result<LoginUserResponse, LoginError> {
        let identifier = request.identifier();

        let user = match self
            .query
            .find_by_identifier(identifier)
            .await
            .map_err(|e| LoginError::QueryError(e.to_string()))?
        {
            Some(user) => user,
            None => {
                self.record(NewLoginHistory::failed(
                    None,
                    identifier.as_log_value(),
                    LoginFailureReason::UserNotFound,
                    client,
                ))
                .await?;
                return Err(LoginError::UserNotFound);
            }
        };

        if !user.is_active {
            self.record(NewLoginHistory::failed(
                Some(user.id),
                user.phone.clone(),
                LoginFailureReason::AccountInactive,
                client,
            ))
            .await?;
            return Err(LoginError::AccountInactive);
        }

        let is_valid = self
            .password_hasher
            .verify_password(request.password(), &user.password_hash)
            .await
            .map_err(|e| LoginError::PasswordVerificationFailed(e.to_string()))?;

        if !is_valid {
            self.record(NewLoginHistory::failed(
                Some(user.id),
                user.phone.clone(),
                LoginFailureReason::InvalidPassword,
                client,
            ))
            .await?;
            return Err(LoginError::InvalidCredentials);
        }

        let tokens = self
            .token_provider
            .issue_pair(user.id, user.role)
            .map_err(|e| LoginError::TokenGenerationFailed(e.to_string()))?;

        let now = Utc::now();
        self.repository
            .record_login(user.id, now)
            .await
            .map_err(|e| LoginError::BookkeepingFailed(e.to_string()))?;
        self.record(NewLoginHistory::succeeded(&user, client)).await?;

        let mut user = user;
        user.login_count += 1;
        user.last_login = Some(now);

        Ok(LoginUserResponse {
            user: PublicUser::from(user),
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        })
    }
}
