use async_trait::async_trait;
use chrono::{DateTime, Utc};
use email_address::EmailAddress;
use serde::{Deserialize, Deserializer};

use crate::auth::application::domain::entities::{CodeCheck, PublicUser};
use crate::modules::auth::application::ports::outgoing::{
    user_query::UserQuery, user_repository::UserRepository, UserRepositoryError,
};

// ========================= Request =========================
#[derive(Debug, Clone)]
pub struct VerifyEmailRequest {
    email: String,
    code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerifyEmailRequestError {
    #[error("Invalid email format")]
    InvalidEmailFormat,
}

impl VerifyEmailRequest {
    /// Only the email is checked here. The code is judged after lookup, so an
    /// already-verified account answers the same whatever code is sent.
    pub fn new(email: String, code: String) -> Result<Self, VerifyEmailRequestError> {
        let email = email.trim();
        if !EmailAddress::is_valid(email) {
            return Err(VerifyEmailRequestError::InvalidEmailFormat);
        }

        Ok(Self {
            email: email.to_lowercase(),
            code: code.trim().to_string(),
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn code(&self) -> &str {
        &self.code
    }
}

impl<'de> Deserialize<'de> for VerifyEmailRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct VerifyEmailRequestHelper {
            email: String,
            code: String,
        }

        let helper = VerifyEmailRequestHelper::deserialize(deserializer)?;
        VerifyEmailRequest::new(helper.email, helper.code).map_err(serde::de::Error::custom)
    }
}

// ========================= Outcome / Errors =========================
#[derive(Debug, Clone, PartialEq)]
pub enum VerifyEmailOutcome {
    Verified(PublicUser),
    AlreadyVerified,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum VerifyUserEmailError {
    #[error("User not found")]
    UserNotFound,

    #[error("Invalid verification code")]
    InvalidCode,

    #[error("Verification code has expired")]
    CodeExpired,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

// ========================= Use Case =========================
#[async_trait]
pub trait IVerifyUserEmailUseCase: Send + Sync {
    async fn execute(
        &self,
        request: VerifyEmailRequest,
    ) -> Result<VerifyEmailOutcome, VerifyUserEmailError>;
}

#[derive(Debug, Clone)]
pub struct VerifyUserEmailUseCase<Q, R>
where
    Q: UserQuery + Send + Sync,
    R: UserRepository + Send + Sync,
{
    query: Q,
    repository: R,
    clock: fn() -> DateTime<Utc>,
}

impl<Q, R> VerifyUserEmailUseCase<Q, R>
where
    Q: UserQuery + Send + Sync,
    R: UserRepository + Send + Sync,
{
    pub fn new(query: Q, repository: R) -> Self {
        Self {
            query,
            repository,
            clock: Utc::now,
        }
    }

    #[cfg(test)]
    fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }
}

#[async_trait]
impl<Q, R> IVerifyUserEmailUseCase for VerifyUserEmailUseCase<Q, R>
where
    Q: UserQuery + Send + Sync,
    R: UserRepository + Send + Sync,
{
    async fn execute(
        &self,
        request: VerifyEmailRequest,
    ) -> Result<VerifyEmailOutcome, VerifyUserEmailError> {
        let user = self
            .query
            .find_by_email(request.email())
            .await
            .map_err(|e| VerifyUserEmailError::DatabaseError(e.to_string()))?
            .ok_or(VerifyUserEmailError::UserNotFound)?;

        match user.check_verification_code(request.code(), (self.clock)()) {
            CodeCheck::AlreadyVerified => return Ok(VerifyEmailOutcome::AlreadyVerified),
            CodeCheck::Mismatch => return Err(VerifyUserEmailError::InvalidCode),
            CodeCheck::Expired => return Err(VerifyUserEmailError::CodeExpired),
            CodeCheck::Valid => {}
        }

        let verified = self
            .repository
            .mark_verified(user.id)
            .await
            .map_err(|e| match e {
                UserRepositoryError::UserNotFound => VerifyUserEmailError::UserNotFound,
                other => VerifyUserEmailError::DatabaseError(other.to_string()),
            })?;

        Ok(VerifyEmailOutcome::Verified(PublicUser::from(verified)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::domain::entities::User;
    use crate::modules::auth::application::domain::entities::VerificationCode;
    use crate::modules::auth::application::ports::outgoing::user_repository::NewUser;
    use crate::tests::support::fakes::{sample_user, InMemoryUserStore};
    use chrono::Duration;
    use mockall::{mock, predicate::*};
    use uuid::Uuid;

    mock! {
        pub UserRepositoryMock {}
        #[async_trait]
        impl UserRepository for UserRepositoryMock {
            async fn create_user(&self, user: NewUser) -> Result<User, UserRepositoryError>;
            async fn record_login(&self, user_id: Uuid, at: DateTime<Utc>) -> Result<(), UserRepositoryError>;
            async fn touch_last_login(&self, user_id: Uuid, at: DateTime<Utc>) -> Result<(), UserRepositoryError>;
            async fn mark_verified(&self, user_id: Uuid) -> Result<User, UserRepositoryError>;
            async fn set_active(&self, user_id: Uuid, is_active: bool) -> Result<User, UserRepositoryError>;
        }
    }

    fn pending_user(code: &str, expires_in: Duration) -> User {
        let mut user = sample_user("rina@example.com", "+8801711000000");
        user.is_verified = false;
        user.verification_code = Some(code.to_string());
        user.verification_expires_at = Some(Utc::now() + expires_in);
        user
    }

    fn request(code: &str) -> VerifyEmailRequest {
        VerifyEmailRequest::new("Rina@Example.com".to_string(), code.to_string()).unwrap()
    }

    #[test]
    fn request_rejects_bad_email() {
        assert_eq!(
            VerifyEmailRequest::new("not-an-email".into(), "123456".into()).unwrap_err(),
            VerifyEmailRequestError::InvalidEmailFormat
        );
    }

    #[tokio::test]
    async fn verified_user_with_malformed_code_is_already_verified() {
        let mut user = sample_user("rina@example.com", "+8801711000000");
        user.is_verified = true;
        user.verification_code = None;
        user.verification_expires_at = None;
        let store = InMemoryUserStore::with_users(vec![user]);
        let use_case = VerifyUserEmailUseCase::new(store.clone(), store);

        for code in ["", "12ab"] {
            let outcome = use_case.execute(request(code)).await.unwrap();
            assert_eq!(outcome, VerifyEmailOutcome::AlreadyVerified);
        }
    }

    #[tokio::test]
    async fn malformed_code_on_pending_user_is_invalid() {
        let user = pending_user("123456", Duration::minutes(10));
        let store = InMemoryUserStore::with_users(vec![user.clone()]);

        let result = VerifyUserEmailUseCase::new(store.clone(), store.clone())
            .execute(request("12ab56"))
            .await;

        assert!(matches!(result, Err(VerifyUserEmailError::InvalidCode)));
        assert!(!store.get(user.id).unwrap().is_verified);
    }

    #[tokio::test]
    async fn valid_code_verifies_and_clears() {
        let user = pending_user("123456", Duration::minutes(10));
        let store = InMemoryUserStore::with_users(vec![user.clone()]);

        let outcome = VerifyUserEmailUseCase::new(store.clone(), store.clone())
            .execute(request("123456"))
            .await
            .unwrap();

        match outcome {
            VerifyEmailOutcome::Verified(public) => assert!(public.is_verified),
            other => panic!("Expected Verified, got {:?}", other),
        }

        let stored = store.get(user.id).unwrap();
        assert!(stored.is_verified);
        assert!(stored.verification_code.is_none());
        assert!(stored.verification_expires_at.is_none());
    }

    #[tokio::test]
    async fn second_call_reports_already_verified() {
        let user = pending_user("123456", Duration::minutes(10));
        let store = InMemoryUserStore::with_users(vec![user]);
        let use_case = VerifyUserEmailUseCase::new(store.clone(), store.clone());

        use_case.execute(request("123456")).await.unwrap();
        let second = use_case.execute(request("123456")).await.unwrap();

        assert_eq!(second, VerifyEmailOutcome::AlreadyVerified);
    }

    #[tokio::test]
    async fn expired_code_is_rejected_and_user_stays_unverified() {
        let user = pending_user("123456", Duration::minutes(15));
        let store = InMemoryUserStore::with_users(vec![user.clone()]);

        let result = VerifyUserEmailUseCase::new(store.clone(), store.clone())
            .with_clock(|| Utc::now() + Duration::minutes(16))
            .execute(request("123456"))
            .await;

        assert!(matches!(result, Err(VerifyUserEmailError::CodeExpired)));
        assert!(!store.get(user.id).unwrap().is_verified);
    }

    #[tokio::test]
    async fn wrong_code_never_reaches_repository() {
        let user = pending_user("123456", Duration::minutes(10));
        let query = InMemoryUserStore::with_users(vec![user]);

        let mut repository = MockUserRepositoryMock::new();
        repository.expect_mark_verified().times(0);

        let result = VerifyUserEmailUseCase::new(query, repository)
            .execute(request("654321"))
            .await;

        assert!(matches!(result, Err(VerifyUserEmailError::InvalidCode)));
    }

    #[tokio::test]
    async fn repository_failure_maps_to_database_error() {
        let user = pending_user("123456", Duration::minutes(10));
        let user_id = user.id;
        let query = InMemoryUserStore::with_users(vec![user]);

        let mut repository = MockUserRepositoryMock::new();
        repository
            .expect_mark_verified()
            .with(eq(user_id))
            .times(1)
            .returning(|_| Err(UserRepositoryError::DatabaseError("deadlock".to_string())));

        let result = VerifyUserEmailUseCase::new(query, repository)
            .execute(request("123456"))
            .await;

        assert!(matches!(result, Err(VerifyUserEmailError::DatabaseError(_))));
    }

    #[tokio::test]
    async fn unknown_email_is_not_found() {
        let store = InMemoryUserStore::default();

        let result = VerifyUserEmailUseCase::new(store.clone(), store)
            .execute(request("123456"))
            .await;

        assert!(matches!(result, Err(VerifyUserEmailError::UserNotFound)));
    }

    #[test]
    fn generated_code_is_accepted_by_request() {
        let code = VerificationCode::generate(Utc::now());
        assert!(VerifyEmailRequest::new("a@b.io".into(), code.code).is_ok());
    }
}
