pub mod login_history_repository;
pub mod password_hasher;
pub mod token_provider;
pub mod user_query;
pub mod user_repository;

pub use login_history_repository::{LoginHistoryError, LoginHistoryRepository};
pub use password_hasher::{HashError, PasswordHasher};
pub use token_provider::{TokenClaims, TokenError, TokenProvider};
pub use user_query::{UserQuery, UserQueryError};
pub use user_repository::{NewUser, UserRepository, UserRepositoryError};
