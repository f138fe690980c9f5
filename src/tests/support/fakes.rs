//! In-memory stand-ins for the auth ports, shared by use case and handler tests.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::auth::application::domain::entities::{
    LoginHistoryEntry, NewLoginHistory, Role, User,
};
use crate::auth::application::ports::outgoing::{
    HashError, LoginHistoryError, LoginHistoryRepository, NewUser, PasswordHasher, UserQuery,
    UserQueryError, UserRepository, UserRepositoryError,
};
use crate::shared::api::{PageRequest, PageResult};

pub const SAMPLE_PASSWORD: &str = "Secret123!";

/// Active, verified user whose hash matches `SAMPLE_PASSWORD` under `PlainHasher`.
pub fn sample_user(email: &str, phone: &str) -> User {
    let now = Utc::now();
    User {
        id: Uuid::new_v4(),
        name: "Rina Akter".to_string(),
        phone: phone.to_string(),
        email: email.to_string(),
        password_hash: format!("plain:{}", SAMPLE_PASSWORD),
        role: Role::User,
        is_active: true,
        is_verified: true,
        verification_code: None,
        verification_expires_at: None,
        login_count: 2,
        last_login: None,
        created_at: now,
        updated_at: now,
    }
}

// ============================================================================
// Users
// ============================================================================

#[derive(Clone, Default)]
pub struct InMemoryUserStore {
    users: Arc<Mutex<Vec<User>>>,
    failure: Option<String>,
}

impl InMemoryUserStore {
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(Mutex::new(users)),
            failure: None,
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            users: Arc::default(),
            failure: Some(message.to_string()),
        }
    }

    pub fn snapshot(&self) -> Vec<User> {
        self.users.lock().unwrap().clone()
    }

    pub fn get(&self, id: Uuid) -> Option<User> {
        self.snapshot().into_iter().find(|u| u.id == id)
    }

    fn find<F: Fn(&User) -> bool>(&self, pred: F) -> Result<Option<User>, UserQueryError> {
        if let Some(msg) = &self.failure {
            return Err(UserQueryError::DatabaseError(msg.clone()));
        }
        Ok(self.users.lock().unwrap().iter().find(|u| pred(u)).cloned())
    }

    fn update<F: FnOnce(&mut User)>(&self, id: Uuid, f: F) -> Result<User, UserRepositoryError> {
        if let Some(msg) = &self.failure {
            return Err(UserRepositoryError::DatabaseError(msg.clone()));
        }
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(UserRepositoryError::UserNotFound)?;
        f(user);
        user.updated_at = Utc::now();
        Ok(user.clone())
    }
}

#[async_trait]
impl UserQuery for InMemoryUserStore {
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<User>, UserQueryError> {
        self.find(|u| u.id == user_id)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserQueryError> {
        let email = email.trim().to_lowercase();
        self.find(|u| u.email == email)
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, UserQueryError> {
        self.find(|u| u.phone == phone)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserStore {
    async fn create_user(&self, new_user: NewUser) -> Result<User, UserRepositoryError> {
        if let Some(msg) = &self.failure {
            return Err(UserRepositoryError::DatabaseError(msg.clone()));
        }
        let mut users = self.users.lock().unwrap();
        if users
            .iter()
            .any(|u| u.email == new_user.email || u.phone == new_user.phone)
        {
            return Err(UserRepositoryError::UserAlreadyExists);
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: new_user.name,
            phone: new_user.phone,
            email: new_user.email,
            password_hash: new_user.password_hash,
            role: new_user.role,
            is_active: true,
            is_verified: false,
            verification_code: Some(new_user.verification.code),
            verification_expires_at: Some(new_user.verification.expires_at),
            login_count: 0,
            last_login: None,
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn record_login(&self, user_id: Uuid, at: DateTime<Utc>) -> Result<(), UserRepositoryError> {
        self.update(user_id, |u| {
            u.login_count += 1;
            u.last_login = Some(at);
        })
        .map(|_| ())
    }

    async fn touch_last_login(
        &self,
        user_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<(), UserRepositoryError> {
        self.update(user_id, |u| u.last_login = Some(at)).map(|_| ())
    }

    async fn mark_verified(&self, user_id: Uuid) -> Result<User, UserRepositoryError> {
        self.update(user_id, |u| {
            u.is_verified = true;
            u.verification_code = None;
            u.verification_expires_at = None;
        })
    }

    async fn set_active(&self, user_id: Uuid, is_active: bool) -> Result<User, UserRepositoryError> {
        self.update(user_id, |u| u.is_active = is_active)
    }
}

// ============================================================================
// Login history
// ============================================================================

#[derive(Clone, Default)]
pub struct InMemoryLoginHistory {
    rows: Arc<Mutex<Vec<NewLoginHistory>>>,
    fail: bool,
}

impl InMemoryLoginHistory {
    pub fn failing() -> Self {
        Self {
            rows: Arc::default(),
            fail: true,
        }
    }

    pub fn entries(&self) -> Vec<NewLoginHistory> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl LoginHistoryRepository for InMemoryLoginHistory {
    async fn record(&self, entry: NewLoginHistory) -> Result<(), LoginHistoryError> {
        if self.fail {
            return Err(LoginHistoryError::DatabaseError("history offline".to_string()));
        }
        self.rows.lock().unwrap().push(entry);
        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        phone: &str,
        page: PageRequest,
    ) -> Result<PageResult<LoginHistoryEntry>, LoginHistoryError> {
        if self.fail {
            return Err(LoginHistoryError::DatabaseError("history offline".to_string()));
        }
        let matching: Vec<LoginHistoryEntry> = self
            .entries()
            .into_iter()
            .rev()
            .filter(|row| row.user_id == Some(user_id) || row.phone == phone)
            .map(|row| LoginHistoryEntry {
                id: Uuid::new_v4(),
                user_id: row.user_id,
                phone: row.phone,
                ip: row.client.ip,
                user_agent: row.client.user_agent,
                success: row.success,
                failure_reason: row.failure_reason.map(|r| r.code().to_string()),
                action: row.action,
                created_at: Utc::now(),
            })
            .collect();

        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();
        Ok(PageResult::new(items, page, total))
    }
}

// ============================================================================
// Hasher
// ============================================================================

/// Reversible "hash" so tests skip bcrypt's cost.
pub struct PlainHasher;

#[async_trait]
impl PasswordHasher for PlainHasher {
    async fn hash_password(&self, password: &str) -> Result<String, HashError> {
        Ok(format!("plain:{}", password))
    }

    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, HashError> {
        Ok(hash == format!("plain:{}", password))
    }
}
