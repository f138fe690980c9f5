use async_trait::async_trait;
use bcrypt::{hash, verify};
use tokio::task;

use crate::auth::application::ports::outgoing::password_hasher::{HashError, PasswordHasher};

pub const DEFAULT_BCRYPT_COST: u32 = 12;

/// bcrypt on the blocking pool; hashing at cost 12 takes long enough to stall a worker.
#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    cost: u32,
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self {
            cost: DEFAULT_BCRYPT_COST,
        }
    }
}

impl BcryptHasher {
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }
}

#[async_trait]
impl PasswordHasher for BcryptHasher {
    async fn hash_password(&self, password: &str) -> Result<String, HashError> {
        let password = password.to_owned();
        let cost = self.cost;
        task::spawn_blocking(move || hash(password, cost))
            .await
            .map_err(|_| HashError::TaskFailed)?
            .map_err(|_| HashError::HashFailed)
    }

    async fn verify_password(&self, password: &str, hashed: &str) -> Result<bool, HashError> {
        let password = password.to_owned();
        let hashed = hashed.to_owned();
        task::spawn_blocking(move || verify(password, &hashed))
            .await
            .map_err(|_| HashError::TaskFailed)?
            .map_err(|_| HashError::VerifyFailed)
    }
}
