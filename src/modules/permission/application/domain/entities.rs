use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MAX_PERMISSION_KEY_LEN: usize = 64;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    pub id: Uuid,
    pub user_id: Uuid,
    pub permissions: Vec<String>,
    pub granted_by: Option<Uuid>,
    pub granted_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPermission {
    pub user_id: Uuid,
    pub permissions: Vec<String>,
    pub granted_by: Uuid,
    pub granted_at: DateTime<Utc>,
    pub is_active: bool,
}

/// Body of `PUT /api/permissions/{userId}`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PermissionUpdate {
    pub permissions: Option<Vec<String>>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PermissionUpdateError {
    #[error("Permission keys cannot be blank")]
    BlankKey,

    #[error("Permission key longer than 64 characters: {0}")]
    KeyTooLong(String),
}

impl PermissionUpdate {
    /// Trims keys and drops duplicates, keeping first-seen order.
    pub fn normalized(self) -> Result<Self, PermissionUpdateError> {
        let permissions = match self.permissions {
            Some(keys) => {
                let mut seen: Vec<String> = Vec::with_capacity(keys.len());
                for key in keys {
                    let key = key.trim();
                    if key.is_empty() {
                        return Err(PermissionUpdateError::BlankKey);
                    }
                    if key.chars().count() > MAX_PERMISSION_KEY_LEN {
                        return Err(PermissionUpdateError::KeyTooLong(key.to_string()));
                    }
                    if !seen.iter().any(|k| k == key) {
                        seen.push(key.to_string());
                    }
                }
                Some(seen)
            }
            None => None,
        };

        Ok(Self {
            permissions,
            is_active: self.is_active,
        })
    }

    pub fn into_new(self, user_id: Uuid, caller: Uuid, now: DateTime<Utc>) -> NewPermission {
        NewPermission {
            user_id,
            permissions: self.permissions.unwrap_or_default(),
            granted_by: caller,
            granted_at: now,
            is_active: self.is_active.unwrap_or(true),
        }
    }
}

impl Permission {
    /// Next state after `update`.
    ///
    /// Re-activating records a fresh grant. The first deactivation stamps
    /// `revoked_at`, which is never moved afterwards.
    pub fn apply(&self, update: PermissionUpdate, caller: Uuid, now: DateTime<Utc>) -> Permission {
        let mut next = self.clone();
        let is_active = update.is_active.unwrap_or(self.is_active);

        if let Some(permissions) = update.permissions {
            if permissions != self.permissions {
                next.granted_by = Some(caller);
            }
            next.permissions = permissions;
        }

        if !self.is_active && is_active {
            next.granted_by = Some(caller);
            next.granted_at = now;
        }

        if self.is_active && !is_active && self.revoked_at.is_none() {
            next.revoked_at = Some(now);
        }

        next.is_active = is_active;
        next
    }
}
