use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::application::domain::entities::{LoginHistoryEntry, Role, UserIdentifier};
use crate::auth::application::helpers::{ResolveUserError, UserIdentityResolver};
use crate::auth::application::ports::outgoing::LoginHistoryRepository;
use crate::shared::api::{PageRequest, PageResult};

#[derive(Debug, Clone, thiserror::Error)]
pub enum SigninHistoryError {
    #[error("User not found")]
    UserNotFound,

    #[error("Not allowed to read another account's history")]
    Forbidden,

    #[error("Query error: {0}")]
    QueryError(String),
}

/// Who is asking. Admins may read any account, everyone else only their own.
#[derive(Debug, Clone, Copy)]
pub struct Requester {
    pub user_id: Uuid,
    pub role: Role,
}

#[async_trait]
pub trait ISigninHistoryUseCase: Send + Sync {
    async fn execute(
        &self,
        requester: Requester,
        account: UserIdentifier,
        page: PageRequest,
    ) -> Result<PageResult<LoginHistoryEntry>, SigninHistoryError>;
}

#[derive(Clone)]
pub struct SigninHistoryUseCase<L>
where
    L: LoginHistoryRepository + Send + Sync,
{
    resolver: UserIdentityResolver,
    history: L,
}

impl<L> SigninHistoryUseCase<L>
where
    L: LoginHistoryRepository + Send + Sync,
{
    pub fn new(resolver: UserIdentityResolver, history: L) -> Self {
        Self { resolver, history }
    }
}

#[async_trait]
impl<L> ISigninHistoryUseCase for SigninHistoryUseCase<L>
where
    L: LoginHistoryRepository + Send + Sync,
{
    async fn execute(
        &self,
        requester: Requester,
        account: UserIdentifier,
        page: PageRequest,
    ) -> Result<PageResult<LoginHistoryEntry>, SigninHistoryError> {
        // Non-admins get Forbidden for unknown accounts too, so existence is not revealed.
        let owner = self.resolver.resolve(&account).await.map_err(|e| match e {
            ResolveUserError::NotFound if requester.role.is_admin() => {
                SigninHistoryError::UserNotFound
            }
            ResolveUserError::NotFound => SigninHistoryError::Forbidden,
            ResolveUserError::RepositoryError(msg) => SigninHistoryError::QueryError(msg),
        })?;

        if owner.id != requester.user_id && !requester.role.is_admin() {
            return Err(SigninHistoryError::Forbidden);
        }

        self.history
            .list_for_user(owner.id, &owner.phone, page)
            .await
            .map_err(|e| SigninHistoryError::QueryError(e.to_string()))
    }
}
