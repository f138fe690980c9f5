use serde_json::{Map, Value};

/// Allow-listed partial update of an order's payment block.
///
/// Built from an arbitrary JSON object: unknown keys are dropped, numeric
/// fields accept numbers or numeric strings and fall back to 0, `pType` is
/// taken only when it is a string.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PaymentUpdate {
    pub p_type: Option<String>,
    pub p_amount: Option<f64>,
    pub p_offer_discount: Option<f64>,
    pub p_extra_charge: Option<f64>,
    pub p_discount: Option<f64>,
    pub p_received: Option<f64>,
    pub p_refunded: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaymentUpdateError {
    #[error("Payment update must be a JSON object")]
    NotAnObject,
}

impl PaymentUpdate {
    pub fn from_json(body: &Value) -> Result<Self, PaymentUpdateError> {
        let fields = body.as_object().ok_or(PaymentUpdateError::NotAnObject)?;

        Ok(Self {
            p_type: fields
                .get("pType")
                .and_then(Value::as_str)
                .map(|s| s.trim().to_string()),
            p_amount: number(fields, "pAmount"),
            p_offer_discount: number(fields, "pOfferDiscount"),
            p_extra_charge: number(fields, "pExtraCharge"),
            p_discount: number(fields, "pDiscount"),
            p_received: number(fields, "pReceived"),
            p_refunded: number(fields, "pRefunded"),
        })
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn number(fields: &Map<String, Value>, key: &str) -> Option<f64> {
    fields.get(key).map(coerce_number)
}

fn coerce_number(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|n| n.is_finite()).unwrap_or(0.0)
}
