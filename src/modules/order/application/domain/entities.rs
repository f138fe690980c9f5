use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::application::domain::entities::UserIdentifier;

pub const TRACK_ID_PREFIX: &str = "ZY";
const TRACK_ID_DIGITS: usize = 10;

// ============================================================================
// Parcel
// ============================================================================

/// Sender or receiver of a parcel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    pub address: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ParcelBox {
    pub length: f64,
    pub width: f64,
    pub height: f64,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParcelItem {
    pub description: String,
    pub quantity: u32,
    #[serde(default)]
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parcel {
    pub from_country: String,
    pub to_country: String,
    pub sender: Party,
    pub receiver: Party,
    #[serde(rename = "box", default)]
    pub parcel_box: ParcelBox,
    #[serde(default)]
    pub items: Vec<ParcelItem>,
    pub service: String,
    pub priority: String,
    pub order_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParcelError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Box dimensions and weight cannot be negative")]
    NegativeMeasure,

    #[error("{0} is not a valid phone number")]
    InvalidPhone(&'static str),
}

/// Canonical phone form shared with user accounts, `None` when `raw` is not a phone.
pub fn normalize_phone(raw: &str) -> Option<String> {
    match UserIdentifier::parse(raw) {
        Ok(UserIdentifier::Phone(phone)) => Some(phone),
        _ => None,
    }
}

impl Parcel {
    pub fn validate(&self) -> Result<(), ParcelError> {
        let required = [
            ("fromCountry", &self.from_country),
            ("toCountry", &self.to_country),
            ("sender.name", &self.sender.name),
            ("sender.phone", &self.sender.phone),
            ("receiver.name", &self.receiver.name),
            ("receiver.phone", &self.receiver.phone),
            ("service", &self.service),
        ];
        if let Some((field, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(ParcelError::MissingField(field));
        }

        let b = self.parcel_box;
        if [b.length, b.width, b.height, b.weight].iter().any(|m| *m < 0.0) {
            return Err(ParcelError::NegativeMeasure);
        }
        Ok(())
    }

    /// Validates and rewrites both party phones into their canonical form.
    pub fn normalized(mut self) -> Result<Self, ParcelError> {
        self.validate()?;
        self.sender.phone =
            normalize_phone(&self.sender.phone).ok_or(ParcelError::InvalidPhone("sender.phone"))?;
        self.receiver.phone = normalize_phone(&self.receiver.phone)
            .ok_or(ParcelError::InvalidPhone("receiver.phone"))?;
        Ok(self)
    }
}

// ============================================================================
// Payment
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Payment {
    pub p_type: Option<String>,
    pub p_amount: f64,
    pub p_offer_discount: f64,
    pub p_extra_charge: f64,
    pub p_discount: f64,
    pub p_received: f64,
    pub p_refunded: f64,
}

/// Carrier handoff for legs the company does not run itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Handover {
    pub carrier: String,
    pub tracking_number: Option<String>,
    pub handed_over_at: Option<DateTime<Utc>>,
}

// ============================================================================
// Order
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub track_id: String,
    pub parcel: Parcel,
    pub payment: Payment,
    pub handover_by: Option<Handover>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// True when the phone belongs to the sender or the receiver.
    pub fn involves_phone(&self, phone: &str) -> bool {
        let Some(phone) = normalize_phone(phone) else {
            return false;
        };
        [&self.parcel.sender.phone, &self.parcel.receiver.phone]
            .iter()
            .any(|party| normalize_phone(party).as_deref() == Some(phone.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub track_id: String,
    pub parcel: Parcel,
    pub payment: Payment,
    pub created_by: Uuid,
}

/// `ZY` followed by ten random digits.
pub fn generate_track_id() -> String {
    let mut rng = rand::thread_rng();
    let digits: String = (0..TRACK_ID_DIGITS)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect();
    format!("{}{}", TRACK_ID_PREFIX, digits)
}
