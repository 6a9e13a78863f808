//! Payment record.
//!
//! # Invariants
//! - `amount` is required; zero counts as missing.
//! - `status` keeps the wire values `pago`/`pendente`; any other text is
//!   preserved verbatim as `PaymentStatus::Other`.
//! - `installment` is written as `"yes"`/`"no"`; `"sim"`/`"nao"` and JSON
//!   booleans are accepted on read.

use super::document::Document;
use super::id::RecordId;
use super::validation::{require_amount, require_text, ValidationError};
use super::{apply, EntityKind, Record};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

pub const DEFAULT_PAYMENT_METHOD: &str = "Pix";

/// Settlement state of a payment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentStatus {
    /// Wire value `pago`.
    #[default]
    Paid,
    /// Wire value `pendente`.
    Pending,
    Other(String),
}

impl PaymentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Paid => "pago",
            Self::Pending => "pendente",
            Self::Other(value) => value.as_str(),
        }
    }
}

impl From<String> for PaymentStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "pago" => Self::Paid,
            "pendente" => Self::Pending,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for PaymentStatus {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<PaymentStatus> for String {
    fn from(value: PaymentStatus) -> Self {
        match value {
            PaymentStatus::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Payment {
    #[serde(deserialize_with = "crate::model::lenient::text")]
    pub id: RecordId,
    #[serde(alias = "clienteId", deserialize_with = "crate::model::lenient::text")]
    pub client_id: RecordId,
    #[serde(alias = "valor", with = "crate::model::lenient::decimal")]
    pub amount: Decimal,
    #[serde(alias = "forma", deserialize_with = "crate::model::lenient::text")]
    pub method: String,
    #[serde(alias = "parcelado", with = "yes_no")]
    pub installment: bool,
    #[serde(alias = "parcelas", with = "crate::model::lenient::number")]
    pub installments: f64,
    #[serde(alias = "data", deserialize_with = "crate::model::lenient::text")]
    pub date: String,
    #[serde(alias = "obs", deserialize_with = "crate::model::lenient::text")]
    pub notes: String,
    #[serde(deserialize_with = "crate::model::lenient::or_default")]
    pub status: PaymentStatus,
    #[serde(deserialize_with = "crate::model::lenient::or_default")]
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Payment {
    fn default() -> Self {
        Self {
            id: RecordId::new(),
            client_id: RecordId::new(),
            amount: Decimal::ZERO,
            method: DEFAULT_PAYMENT_METHOD.to_string(),
            installment: false,
            installments: 1.0,
            date: String::new(),
            notes: String::new(),
            status: PaymentStatus::Paid,
            created_at: DateTime::<Utc>::default(),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPayment {
    pub client_id: RecordId,
    pub amount: Decimal,
    pub method: String,
    pub installment: bool,
    pub installments: f64,
    pub date: String,
    pub notes: String,
    pub status: PaymentStatus,
}

impl Default for NewPayment {
    fn default() -> Self {
        Self {
            client_id: RecordId::new(),
            amount: Decimal::ZERO,
            method: DEFAULT_PAYMENT_METHOD.to_string(),
            installment: false,
            installments: 1.0,
            date: String::new(),
            notes: String::new(),
            status: PaymentStatus::Paid,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentPatch {
    pub client_id: Option<RecordId>,
    pub amount: Option<Decimal>,
    pub method: Option<String>,
    pub installment: Option<bool>,
    pub installments: Option<f64>,
    pub date: Option<String>,
    pub notes: Option<String>,
    pub status: Option<PaymentStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentFilter {
    pub client_id: Option<RecordId>,
    pub status: Option<PaymentStatus>,
}

impl Record for Payment {
    type New = NewPayment;
    type Patch = PaymentPatch;
    type Filter = PaymentFilter;

    const KIND: EntityKind = EntityKind::Payment;

    fn build(new: NewPayment, id: RecordId, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            client_id: new.client_id,
            amount: new.amount,
            method: new.method.trim().to_string(),
            installment: new.installment,
            installments: new.installments,
            date: new.date.trim().to_string(),
            notes: new.notes.trim().to_string(),
            status: new.status,
            created_at,
            extra: Map::new(),
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text(Self::KIND, "clientId", &self.client_id)?;
        require_amount(Self::KIND, "amount", self.amount)?;
        require_text(Self::KIND, "date", &self.date)
    }

    fn merge(&self, patch: &PaymentPatch) -> Self {
        let mut merged = self.clone();
        apply(&mut merged.client_id, &patch.client_id);
        apply(&mut merged.amount, &patch.amount);
        apply(&mut merged.method, &patch.method);
        apply(&mut merged.installment, &patch.installment);
        apply(&mut merged.installments, &patch.installments);
        apply(&mut merged.date, &patch.date);
        apply(&mut merged.notes, &patch.notes);
        apply(&mut merged.status, &patch.status);
        merged
    }

    fn matches(&self, filter: &PaymentFilter) -> bool {
        let client_ok = filter
            .client_id
            .as_deref()
            .map_or(true, |client_id| self.client_id == client_id);
        let status_ok = filter
            .status
            .as_ref()
            .map_or(true, |status| &self.status == status);
        client_ok && status_ok
    }

    fn display_cmp(&self, other: &Self) -> Ordering {
        self.date.cmp(&other.date)
    }

    fn collection(document: &Document) -> &Vec<Self> {
        &document.payments
    }

    fn collection_mut(document: &mut Document) -> &mut Vec<Self> {
        &mut document.payments
    }
}

mod yes_no {
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { "yes" } else { "no" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::Bool(flag) => flag,
            Value::String(text) => matches!(
                text.trim().to_ascii_lowercase().as_str(),
                "yes" | "sim" | "true"
            ),
            _ => false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Payment, PaymentFilter, PaymentStatus};
    use rust_decimal::Decimal;
    use serde_json::json;

    #[test]
    fn status_keeps_unknown_values() {
        assert_eq!(PaymentStatus::from("pago"), PaymentStatus::Paid);
        assert_eq!(PaymentStatus::from("pendente"), PaymentStatus::Pending);
        let other = PaymentStatus::from("estornado");
        assert_eq!(other, PaymentStatus::Other("estornado".to_string()));
        assert_eq!(String::from(other), "estornado");
    }

    #[test]
    fn reads_portuguese_field_names() {
        let payment: Payment = serde_json::from_value(json!({
            "id": "p1",
            "clienteId": "c1",
            "valor": 150.5,
            "forma": "Dinheiro",
            "parcelado": "sim",
            "parcelas": 3,
            "data": "2024-02-01",
            "obs": "",
            "status": "pendente",
            "createdAt": "2024-02-01T10:00:00.000Z"
        }))
        .unwrap();

        assert_eq!(payment.client_id, "c1");
        assert_eq!(payment.amount, Decimal::new(1505, 1));
        assert_eq!(payment.method, "Dinheiro");
        assert!(payment.installment);
        assert_eq!(payment.installments, 3.0);
        assert_eq!(payment.status, PaymentStatus::Pending);
        assert!(payment.extra.is_empty());
    }

    #[test]
    fn writes_yes_no_flag_and_defaults_missing_fields() {
        let payment: Payment = serde_json::from_value(json!({
            "id": "p1",
            "clientId": "c1",
            "amount": 80,
            "date": "2024-02-01"
        }))
        .unwrap();
        assert_eq!(payment.method, "Pix");
        assert_eq!(payment.installments, 1.0);
        assert_eq!(payment.status, PaymentStatus::Paid);

        let json = serde_json::to_value(&payment).unwrap();
        assert_eq!(json["installment"], "no");
        assert_eq!(json["status"], "pago");
        assert_eq!(json["amount"], 80.0);
    }

    #[test]
    fn status_filter_uses_equality() {
        let payment = Payment {
            status: PaymentStatus::Pending,
            ..Payment::default()
        };
        let pending = PaymentFilter {
            status: Some(PaymentStatus::Pending),
            ..PaymentFilter::default()
        };
        let paid = PaymentFilter {
            status: Some(PaymentStatus::Paid),
            ..PaymentFilter::default()
        };
        assert!(crate::model::Record::matches(&payment, &pending));
        assert!(!crate::model::Record::matches(&payment, &paid));
    }
}
