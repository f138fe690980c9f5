use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ============================================================================
// Status
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackStatus {
    Created,
    PickupPending,
    PickedUp,
    InTransit,
    ArrivedAtHub,
    CustomsClearance,
    OutForDelivery,
    Delivered,
    Failed,
    Cancelled,
}

impl TrackStatus {
    pub const ALL: [TrackStatus; 10] = [
        TrackStatus::Created,
        TrackStatus::PickupPending,
        TrackStatus::PickedUp,
        TrackStatus::InTransit,
        TrackStatus::ArrivedAtHub,
        TrackStatus::CustomsClearance,
        TrackStatus::OutForDelivery,
        TrackStatus::Delivered,
        TrackStatus::Failed,
        TrackStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TrackStatus::Created => "created",
            TrackStatus::PickupPending => "pickup-pending",
            TrackStatus::PickedUp => "picked-up",
            TrackStatus::InTransit => "in-transit",
            TrackStatus::ArrivedAtHub => "arrived-at-hub",
            TrackStatus::CustomsClearance => "customs-clearance",
            TrackStatus::OutForDelivery => "out-for-delivery",
            TrackStatus::Delivered => "delivered",
            TrackStatus::Failed => "failed",
            TrackStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TrackStatus::Delivered | TrackStatus::Failed | TrackStatus::Cancelled
        )
    }
}

impl Default for TrackStatus {
    fn default() -> Self {
        TrackStatus::Created
    }
}

impl fmt::Display for TrackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown track status: {0}")]
pub struct UnknownTrackStatus(pub String);

impl FromStr for TrackStatus {
    type Err = UnknownTrackStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        TrackStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == wanted)
            .ok_or(UnknownTrackStatus(wanted))
    }
}

// ============================================================================
// Track
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackStep {
    pub status: TrackStatus,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub updated_by: Option<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: Uuid,
    pub order_id: Uuid,
    pub track_id: String,
    pub current_status: TrackStatus,
    /// Insertion order. Use [`Track::chronological_history`] for time order.
    pub history: Vec<TrackStep>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Track {
    /// History sorted by step timestamp; equal timestamps keep insertion order.
    pub fn chronological_history(&self) -> Vec<TrackStep> {
        let mut steps = self.history.clone();
        steps.sort_by_key(|step| step.timestamp);
        steps
    }

    pub fn latest_step(&self) -> Option<&TrackStep> {
        self.history.last()
    }

    /// True when the latest step follows a delivered, failed or cancelled one.
    pub fn reopened_after_close(&self) -> bool {
        self.history
            .iter()
            .rev()
            .nth(1)
            .is_some_and(|previous| previous.status.is_terminal())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewTrack {
    pub order_id: Uuid,
    pub track_id: String,
    pub initial: TrackStep,
}

// ============================================================================
// Append request
// ============================================================================

/// Body of `PUT /api/tracks/{trackID}`. Anything outside these fields,
/// `history` included, is rejected.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AppendTrackStep {
    pub status: TrackStatus,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub updated_by: Option<String>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl AppendTrackStep {
    /// `updatedBy` falls back to the caller and `timestamp` to `now`.
    pub fn into_step(self, caller: &str, now: DateTime<Utc>) -> TrackStep {
        TrackStep {
            status: self.status,
            location: self.location,
            description: self.description,
            updated_by: Some(self.updated_by.unwrap_or_else(|| caller.to_string())),
            timestamp: self.timestamp.unwrap_or(now),
        }
    }
}

// ============================================================================
// Listing
// ============================================================================

/// Track id filter. `*` and `%` are wildcards; without one the id must match exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackIdPattern {
    Exact(String),
    /// `ILIKE` pattern with `\` as the escape character.
    Like(String),
}

impl TrackIdPattern {
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        if !raw.contains(['*', '%']) {
            return Some(TrackIdPattern::Exact(raw.to_string()));
        }

        let mut pattern = String::with_capacity(raw.len() + 4);
        for c in raw.chars() {
            match c {
                '\\' => pattern.push_str("\\\\"),
                '_' => pattern.push_str("\\_"),
                '*' | '%' => pattern.push('%'),
                other => pattern.push(other),
            }
        }
        Some(TrackIdPattern::Like(pattern))
    }
}

/// Escapes free text for use inside `%…%`.
pub fn contains_pattern(text: &str) -> String {
    let mut pattern = String::from("%");
    for c in text.trim().chars() {
        if matches!(c, '\\' | '_' | '%') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackSortField {
    #[default]
    CreatedAt,
    UpdatedAt,
    CurrentStatus,
    TrackId,
}

impl TrackSortField {
    /// Anything outside the allow-list sorts by `createdAt`.
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("updatedAt") => TrackSortField::UpdatedAt,
            Some("currentStatus") => TrackSortField::CurrentStatus,
            Some("trackId") => TrackSortField::TrackId,
            _ => TrackSortField::CreatedAt,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("asc") => SortDirection::Asc,
            _ => SortDirection::Desc,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TrackListFilter {
    pub track_id: Option<TrackIdPattern>,
    pub search: Option<String>,
    pub status: Option<TrackStatus>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrackSort {
    pub field: TrackSortField,
    pub direction: SortDirection,
}
