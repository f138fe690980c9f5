use chrono::{DateTime, Duration, Utc};
use email_address::EmailAddress;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use uuid::Uuid;

pub const VERIFICATION_CODE_TTL_MINUTES: i64 = 15;

static RE_PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9]{6,20}$").expect("valid phone regex"));

// ============================================================================
// Role
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Moderator,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Moderator => "moderator",
            Role::Admin => "admin",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Admins and moderators operate the tracking desk.
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Admin | Role::Moderator)
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::User
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(Role::User),
            "moderator" => Ok(Role::Moderator),
            "admin" => Ok(Role::Admin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

// ============================================================================
// User
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub is_active: bool,
    pub is_verified: bool,
    pub verification_code: Option<String>,
    pub verification_expires_at: Option<DateTime<Utc>>,
    pub login_count: i32,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeCheck {
    AlreadyVerified,
    Valid,
    Mismatch,
    Expired,
}

impl User {
    /// Compares a submitted verification code against the stored one.
    pub fn check_verification_code(&self, code: &str, now: DateTime<Utc>) -> CodeCheck {
        if self.is_verified {
            return CodeCheck::AlreadyVerified;
        }

        match (&self.verification_code, self.verification_expires_at) {
            (Some(stored), Some(expires_at)) => {
                if stored != code.trim() {
                    CodeCheck::Mismatch
                } else if now > expires_at {
                    CodeCheck::Expired
                } else {
                    CodeCheck::Valid
                }
            }
            _ => CodeCheck::Mismatch,
        }
    }
}

/// Shape of a user as it leaves the service. Never carries the hash or the code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub role: Role,
    pub is_active: bool,
    pub is_verified: bool,
    pub login_count: i32,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            phone: user.phone.clone(),
            email: user.email.clone(),
            role: user.role,
            is_active: user.is_active,
            is_verified: user.is_verified,
            login_count: user.login_count,
            last_login: user.last_login,
            created_at: user.created_at,
        }
    }
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        PublicUser::from(&user)
    }
}

/// Freshly issued six digit code and its expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationCode {
    pub code: String,
    pub expires_at: DateTime<Utc>,
}

impl VerificationCode {
    pub fn generate(now: DateTime<Utc>) -> Self {
        use rand::Rng;
        let code = rand::thread_rng().gen_range(0..1_000_000u32);
        Self {
            code: format!("{:06}", code),
            expires_at: now + Duration::minutes(VERIFICATION_CODE_TTL_MINUTES),
        }
    }
}

// ============================================================================
// User identifier
// ============================================================================

/// A user reference as it arrives from a client: id, email or phone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserIdentifier {
    Id(Uuid),
    Email(String),
    Phone(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentifierError {
    #[error("Identifier cannot be empty")]
    Empty,

    #[error("Identifier must be a user id, an email address or a phone number")]
    Unrecognized,
}

impl UserIdentifier {
    /// Email is lower-cased; phone drops spaces, dashes and parentheses.
    pub fn parse(raw: &str) -> Result<Self, IdentifierError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(IdentifierError::Empty);
        }

        if let Ok(id) = Uuid::parse_str(raw) {
            return Ok(UserIdentifier::Id(id));
        }

        if raw.contains('@') {
            return if EmailAddress::is_valid(raw) {
                Ok(UserIdentifier::Email(raw.to_lowercase()))
            } else {
                Err(IdentifierError::Unrecognized)
            };
        }

        let phone: String = raw
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
            .collect();
        if RE_PHONE.is_match(&phone) {
            return Ok(UserIdentifier::Phone(phone));
        }

        Err(IdentifierError::Unrecognized)
    }

    /// Value recorded against login history rows for this identifier.
    pub fn as_log_value(&self) -> String {
        match self {
            UserIdentifier::Id(id) => id.to_string(),
            UserIdentifier::Email(email) => email.clone(),
            UserIdentifier::Phone(phone) => phone.clone(),
        }
    }
}

impl fmt::Display for UserIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserIdentifier::Id(id) => write!(f, "id:{}", id),
            UserIdentifier::Email(email) => write!(f, "email:{}", email),
            UserIdentifier::Phone(phone) => write!(f, "phone:{}", phone),
        }
    }
}

// ============================================================================
// Login history
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoginAction {
    Login,
    Logout,
}

impl LoginAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoginAction::Login => "login",
            LoginAction::Logout => "logout",
        }
    }

    pub fn from_db(value: &str) -> Self {
        match value {
            "logout" => LoginAction::Logout,
            _ => LoginAction::Login,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoginFailureReason {
    UserNotFound,
    AccountInactive,
    InvalidPassword,
}

impl LoginFailureReason {
    pub fn code(&self) -> &'static str {
        match self {
            LoginFailureReason::UserNotFound => "USER_NOT_FOUND",
            LoginFailureReason::AccountInactive => "ACCOUNT_INACTIVE",
            LoginFailureReason::InvalidPassword => "INVALID_PASSWORD",
        }
    }
}

/// Request metadata attached to history rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientInfo {
    pub ip: Option<String>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewLoginHistory {
    pub user_id: Option<Uuid>,
    pub phone: String,
    pub client: ClientInfo,
    pub success: bool,
    pub failure_reason: Option<LoginFailureReason>,
    pub action: LoginAction,
}

impl NewLoginHistory {
    pub fn succeeded(user: &User, client: ClientInfo) -> Self {
        Self {
            user_id: Some(user.id),
            phone: user.phone.clone(),
            client,
            success: true,
            failure_reason: None,
            action: LoginAction::Login,
        }
    }

    pub fn failed(
        user_id: Option<Uuid>,
        phone: String,
        reason: LoginFailureReason,
        client: ClientInfo,
    ) -> Self {
        Self {
            user_id,
            phone,
            client,
            success: false,
            failure_reason: Some(reason),
            action: LoginAction::Login,
        }
    }

    pub fn logout(user: &User, client: ClientInfo) -> Self {
        Self {
            user_id: Some(user.id),
            phone: user.phone.clone(),
            client,
            success: true,
            failure_reason: None,
            action: LoginAction::Logout,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginHistoryEntry {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub phone: String,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub success: bool,
    pub failure_reason: Option<String>,
    pub action: LoginAction,
    pub created_at: DateTime<Utc>,
}
