use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Deserializer, Serialize};

use crate::auth::application::ports::outgoing::token_provider::{TokenError, TokenProvider};
use crate::auth::application::ports::outgoing::{UserQuery, UserRepository};

// ========================= Refresh Token Request =========================
#[derive(Debug, Clone)]
pub struct RefreshTokenRequest {
    refresh_token: String, // Private - guaranteed non-empty
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshTokenRequestError {
    EmptyToken,
}

impl std::fmt::Display for RefreshTokenRequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RefreshTokenRequestError::EmptyToken => write!(f, "Refresh token cannot be empty"),
        }
    }
}

impl std::error::Error for RefreshTokenRequestError {}

impl RefreshTokenRequest {
    pub fn new(refresh_token: String) -> Result<Self, RefreshTokenRequestError> {
        if refresh_token.trim().is_empty() {
            return Err(RefreshTokenRequestError::EmptyToken);
        }

        Ok(Self {
            refresh_token: refresh_token.trim().to_string(),
        })
    }

    pub fn refresh_token(&self) -> &str {
        &self.refresh_token
    }
}

impl<'de> Deserialize<'de> for RefreshTokenRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct RefreshTokenRequestHelper {
            #[serde(alias = "refreshToken")]
            refresh_token: String,
        }

        let helper = RefreshTokenRequestHelper::deserialize(deserializer)?;
        RefreshTokenRequest::new(helper.refresh_token).map_err(serde::de::Error::custom)
    }
}

// ========================= Response / Errors =========================
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenResponse {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum RefreshTokenError {
    #[error("Invalid refresh token: {0}")]
    InvalidToken(TokenError),

    #[error("User not found")]
    UserNotFound,

    #[error("Account is inactive")]
    AccountInactive,

    #[error("Token generation failed: {0}")]
    TokenGenerationFailed(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

// ========================= Use Case =========================
#[async_trait]
pub trait IRefreshTokenUseCase: Send + Sync {
    async fn execute(
        &self,
        request: RefreshTokenRequest,
    ) -> Result<RefreshTokenResponse, RefreshTokenError>;
}

/// Rotates the pair. The role is re-read from the store, never copied from the old token.
#[derive(Clone)]
pub struct RefreshTokenUseCase<Q, R>
where
    Q: UserQuery + Send + Sync,
    R: UserRepository + Send + Sync,
{
    query: Q,
    repository: R,
    token_provider: Arc<dyn TokenProvider + Send + Sync>,
}

impl<Q, R> RefreshTokenUseCase<Q, R>
where
    Q: UserQuery + Send + Sync,
    R: UserRepository + Send + Sync,
{
    pub fn new(
        query: Q,
        repository: R,
        token_provider: Arc<dyn TokenProvider + Send + Sync>,
    ) -> Self {
        Self {
            query,
            repository,
            token_provider,
        }
    }
}

#[async_trait]
impl<Q, R> IRefreshTokenUseCase for RefreshTokenUseCase<Q, R>
where
    Q: UserQuery + Send + Sync,
    R: UserRepository + Send + Sync,
{
    async fn execute(
        &self,
        request: RefreshTokenRequest,
    ) -> Result<RefreshTokenResponse, RefreshTokenError> {
        let claims = self
            .token_provider
            .verify_refresh_token(request.refresh_token())
            .map_err(RefreshTokenError::InvalidToken)?;

        let user = self
            .query
            .find_by_id(claims.sub)
            .await
            .map_err(|e| RefreshTokenError::DatabaseError(e.to_string()))?
            .ok_or(RefreshTokenError::UserNotFound)?;

        if !user.is_active {
            return Err(RefreshTokenError::AccountInactive);
        }

        let pair = self
            .token_provider
            .issue_pair(user.id, user.role)
            .map_err(|e| RefreshTokenError::TokenGenerationFailed(e.to_string()))?;

        self.repository
            .touch_last_login(user.id, Utc::now())
            .await
            .map_err(|e| RefreshTokenError::DatabaseError(e.to_string()))?;

        Ok(RefreshTokenResponse {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
        })
    }
}
