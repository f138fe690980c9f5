use async_trait::async_trait;
use email_address::EmailAddress;
use serde::{Deserialize, Deserializer};
use std::sync::Arc;

use crate::auth::application::domain::entities::{Role, User, UserIdentifier, VerificationCode};
use crate::auth::application::ports::outgoing::{
    user_query::UserQuery,
    user_repository::{NewUser, UserRepository},
    PasswordHasher, UserRepositoryError,
};

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_NAME_LENGTH: usize = 100;

// ========================= Signup Request =========================
/// Validated signup payload.
#[derive(Debug, Clone)]
pub struct SignupRequest {
    name: String,
    phone: String,
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignupRequestError {
    #[error("Name cannot be empty")]
    EmptyName,

    #[error("Name must be at most 100 characters")]
    NameTooLong,

    #[error("Invalid phone number")]
    InvalidPhone,

    #[error("Invalid email format")]
    InvalidEmailFormat,

    #[error("Password must be at least 8 characters")]
    PasswordTooShort,
}

impl SignupRequest {
    pub fn new(
        name: String,
        phone: String,
        email: String,
        password: String,
    ) -> Result<Self, SignupRequestError> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(SignupRequestError::EmptyName);
        }
        if name.chars().count() > MAX_NAME_LENGTH {
            return Err(SignupRequestError::NameTooLong);
        }

        let phone = match UserIdentifier::parse(&phone) {
            Ok(UserIdentifier::Phone(phone)) => phone,
            _ => return Err(SignupRequestError::InvalidPhone),
        };

        let email = email.trim();
        if !EmailAddress::is_valid(email) {
            return Err(SignupRequestError::InvalidEmailFormat);
        }

        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(SignupRequestError::PasswordTooShort);
        }

        Ok(Self {
            name,
            phone,
            email: email.to_lowercase(),
            password,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl<'de> Deserialize<'de> for SignupRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct SignupRequestHelper {
            name: String,
            phone: String,
            email: String,
            password: String,
        }

        let helper = SignupRequestHelper::deserialize(deserializer)?;
        SignupRequest::new(helper.name, helper.phone, helper.email, helper.password)
            .map_err(serde::de::Error::custom)
    }
}

// ========================= Errors =========================
#[derive(Debug, Clone, thiserror::Error)]
pub enum CreateUserError {
    #[error("Email is already registered")]
    EmailAlreadyExists,

    #[error("Phone is already registered")]
    PhoneAlreadyExists,

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

// ========================= Use Case =========================
#[async_trait]
pub trait ICreateUserUseCase: Send + Sync {
    async fn execute(&self, request: SignupRequest) -> Result<User, CreateUserError>;
}

#[derive(Clone)]
pub struct CreateUserUseCase<Q, R>
where
    Q: UserQuery + Send + Sync,
    R: UserRepository + Send + Sync,
{
    query: Q,
    repository: R,
    password_hasher: Arc<dyn PasswordHasher + Send + Sync>,
}

impl<Q, R> CreateUserUseCase<Q, R>
where
    Q: UserQuery + Send + Sync,
    R: UserRepository + Send + Sync,
{
    pub fn new(
        query: Q,
        repository: R,
        password_hasher: Arc<dyn PasswordHasher + Send + Sync>,
    ) -> Self {
        Self {
            query,
            repository,
            password_hasher,
        }
    }
}

#[async_trait]
impl<Q, R> ICreateUserUseCase for CreateUserUseCase<Q, R>
where
    Q: UserQuery + Send + Sync,
    R: UserRepository + Send + Sync,
{
    async fn execute(&self, request: SignupRequest) -> Result<User, CreateUserError> {
        if self
            .query
            .find_by_email(request.email())
            .await
            .map_err(|e| CreateUserError::QueryError(e.to_string()))?
            .is_some()
        {
            return Err(CreateUserError::EmailAlreadyExists);
        }

        if self
            .query
            .find_by_phone(request.phone())
            .await
            .map_err(|e| CreateUserError::QueryError(e.to_string()))?
            .is_some()
        {
            return Err(CreateUserError::PhoneAlreadyExists);
        }

        let password_hash = self
            .password_hasher
            .hash_password(request.password())
            .await
            .map_err(|e| CreateUserError::HashingFailed(e.to_string()))?;

        let new_user = NewUser {
            name: request.name().to_string(),
            phone: request.phone().to_string(),
            email: request.email().to_string(),
            password_hash,
            role: Role::User,
            verification: VerificationCode::generate(chrono::Utc::now()),
        };

        // The unique indexes still guard the race between the checks above and the insert.
        self.repository
            .create_user(new_user)
            .await
            .map_err(|e| match e {
                UserRepositoryError::UserAlreadyExists => CreateUserError::EmailAlreadyExists,
                other => CreateUserError::RepositoryError(other.to_string()),
            })
    }
}
