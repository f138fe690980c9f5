use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::auth::application::domain::entities::Role;
use crate::tracking::application::domain::entities::TrackStatus;

// ============================================================================
// Resources and filters
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyticsResource {
    Users,
    Orders,
    Logins,
    Notifications,
    Permissions,
}

impl AnalyticsResource {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalyticsResource::Users => "users",
            AnalyticsResource::Orders => "orders",
            AnalyticsResource::Logins => "logins",
            AnalyticsResource::Notifications => "notifications",
            AnalyticsResource::Permissions => "permissions",
        }
    }

    /// Values accepted by the `status` filter of this resource.
    pub fn statuses(&self) -> Vec<&'static str> {
        match self {
            AnalyticsResource::Users => vec!["active", "inactive"],
            AnalyticsResource::Orders => TrackStatus::ALL.iter().map(|s| s.as_str()).collect(),
            AnalyticsResource::Logins => vec!["success", "failed"],
            AnalyticsResource::Notifications => vec!["read", "unread"],
            AnalyticsResource::Permissions => vec!["active", "revoked"],
        }
    }
}

impl fmt::Display for AnalyticsResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown analytics resource: {0}")]
pub struct UnknownResource(pub String);

impl FromStr for AnalyticsResource {
    type Err = UnknownResource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "users" => Ok(AnalyticsResource::Users),
            "orders" => Ok(AnalyticsResource::Orders),
            "logins" => Ok(AnalyticsResource::Logins),
            "notifications" => Ok(AnalyticsResource::Notifications),
            "permissions" => Ok(AnalyticsResource::Permissions),
            other => Err(UnknownResource(other.to_string())),
        }
    }
}

/// Optional constraints, combined with AND. `from` and `to` bound the
/// creation time of the rows being summarised, both inclusive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalyticsFilter {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub role: Option<Role>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalyticsFilterError {
    #[error("`from` must not be later than `to`")]
    InvertedRange,

    #[error("Unsupported status `{status}` for {resource}, expected one of: {allowed}")]
    InvalidStatus {
        resource: &'static str,
        status: String,
        allowed: String,
    },
}

impl AnalyticsFilter {
    pub fn validate_for(&self, resource: AnalyticsResource) -> Result<(), AnalyticsFilterError> {
        if let (Some(from), Some(to)) = (self.from, self.to) {
            if from > to {
                return Err(AnalyticsFilterError::InvertedRange);
            }
        }

        if let Some(status) = &self.status {
            let allowed = resource.statuses();
            if !allowed.contains(&status.as_str()) {
                return Err(AnalyticsFilterError::InvalidStatus {
                    resource: resource.as_str(),
                    status: status.clone(),
                    allowed: allowed.join(", "),
                });
            }
        }

        Ok(())
    }
}

// ============================================================================
// Summaries
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyCount {
    pub key: String,
    pub count: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub total: i64,
    pub active: i64,
    pub inactive: i64,
    pub verified: i64,
    pub unverified: i64,
    pub by_role: Vec<KeyCount>,
    /// Keys are `YYYY-MM`.
    pub signups_per_month: Vec<KeyCount>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentTotals {
    pub requested: f64,
    pub received: f64,
    pub refunded: f64,
    pub discount: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub total: i64,
    pub by_service: Vec<KeyCount>,
    pub by_priority: Vec<KeyCount>,
    /// Orders without a track are counted under `untracked`.
    pub by_status: Vec<KeyCount>,
    pub payments: PaymentTotals,
    /// Keys are `YYYY-MM-DD`.
    pub per_day: Vec<KeyCount>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginSummary {
    pub attempts: i64,
    pub successes: i64,
    pub failures: i64,
    pub failure_reasons: Vec<KeyCount>,
    pub top_failing_ips: Vec<KeyCount>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSummary {
    pub total: i64,
    pub unread: i64,
    pub by_kind: Vec<KeyCount>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionSummary {
    pub total: i64,
    pub active: i64,
    pub revoked: i64,
    pub top_keys: Vec<KeyCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalyticsSummary {
    Users(UserSummary),
    Orders(OrderSummary),
    Logins(LoginSummary),
    Notifications(NotificationSummary),
    Permissions(PermissionSummary),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn resource_names_round_trip() {
        for name in ["users", "orders", "logins", "notifications", "permissions"] {
            let resource: AnalyticsResource = name.parse().unwrap();
            assert_eq!(resource.as_str(), name);
        }
        assert!("reviews".parse::<AnalyticsResource>().is_err());
    }

    #[test]
    fn inverted_range_is_rejected() {
        let now = Utc::now();
        let filter = AnalyticsFilter {
            from: Some(now),
            to: Some(now - Duration::days(1)),
            ..Default::default()
        };
        assert_eq!(
            filter.validate_for(AnalyticsResource::Users),
            Err(AnalyticsFilterError::InvertedRange)
        );
    }

    #[test]
    fn status_vocabulary_depends_on_resource() {
        let filter = AnalyticsFilter {
            status: Some("delivered".into()),
            ..Default::default()
        };
        assert!(filter.validate_for(AnalyticsResource::Orders).is_ok());

        let err = filter.validate_for(AnalyticsResource::Logins).unwrap_err();
        assert!(err.to_string().contains("success, failed"));
    }

    #[test]
    fn summaries_serialize_without_wrapper() {
        let summary = AnalyticsSummary::Notifications(NotificationSummary {
            total: 3,
            unread: 1,
            by_kind: vec![KeyCount {
                key: "welcome".into(),
                count: 3,
            }],
        });
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["total"], 3);
        assert_eq!(json["byKind"][0]["key"], "welcome");
    }
}
