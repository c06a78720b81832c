use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::month::ReportingMonth;

/// Canonical entity id. The API mixes numeric and string id representations
/// across endpoints; both deserialize to the same string form here so that
/// foreign-key joins compare equal without ad-hoc stringification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
pub struct EntityId(String);

impl EntityId {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[allow(dead_code)]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(raw: &str) -> Self {
        Self(raw.trim().to_string())
    }
}

impl From<i64> for EntityId {
    fn from(raw: i64) -> Self {
        Self(raw.to_string())
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let id = match &value {
            Value::String(text) => text.trim().to_string(),
            Value::Number(number) => number.to_string(),
            _ => String::new(),
        };
        Ok(Self(id))
    }
}

/// Money fields arrive as JSON numbers, numeric strings, null, or not at
/// all. Anything non-numeric contributes 0.0 instead of failing ingestion.
fn de_money<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(numeric_value).unwrap_or(0.0))
}

fn de_opt_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(|inner| match inner {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }))
}

fn numeric_value(value: &Value) -> f64 {
    match value {
        Value::Number(number) => number.as_f64().unwrap_or(0.0),
        Value::String(text) => text.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[allow(dead_code)]
pub struct Property {
    #[serde(default)]
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address1: String,
    #[serde(default)]
    pub address2: Option<String>,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[allow(dead_code)]
pub struct Unit {
    #[serde(default)]
    pub id: EntityId,
    #[serde(default)]
    pub property_id: EntityId,
    #[serde(default)]
    pub unit_number: String,
    #[serde(default, deserialize_with = "de_opt_number")]
    pub bedrooms: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_number")]
    pub bathrooms: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_number")]
    pub sq_ft: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[allow(dead_code)]
pub struct Tenant {
    #[serde(default)]
    pub id: EntityId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[allow(dead_code)]
pub struct Lease {
    #[serde(default)]
    pub id: EntityId,
    #[serde(default)]
    pub unit_id: EntityId,
    #[serde(default)]
    pub tenant_id: EntityId,
    #[serde(default, deserialize_with = "de_money")]
    pub monthly_rent: f64,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[allow(dead_code)]
pub struct Payment {
    #[serde(default)]
    pub id: EntityId,
    #[serde(default)]
    pub lease_id: EntityId,
    #[serde(default, deserialize_with = "de_money")]
    pub amount: f64,
    #[serde(default)]
    pub payment_date: String,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PaymentStatus {
    Paid,
    Partial,
    Unpaid,
}

impl PaymentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Paid => "Paid",
            Self::Partial => "Partial",
            Self::Unpaid => "Unpaid",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-lease financial status for one reporting month. Derived, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaseStatus {
    pub lease_id: EntityId,
    pub due: f64,
    pub paid: f64,
    pub outstanding: f64,
    pub status: PaymentStatus,
}

/// Snapshot-wide totals over the raw sums (see `compute_totals`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SnapshotTotals {
    pub due: f64,
    pub collected: f64,
    pub outstanding: f64,
}

/// The five entity collections fetched for one reporting month. Immutable;
/// discarded and refetched on month change or explicit refresh.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub month: ReportingMonth,
    pub properties: Vec<Property>,
    pub units: Vec<Unit>,
    pub tenants: Vec<Tenant>,
    pub leases: Vec<Lease>,
    pub payments: Vec<Payment>,
}

#[cfg(test)]
mod tests {
    use super::{EntityId, Lease, Payment, Unit};
    use serde_json::json;

    #[test]
    fn numeric_and_string_ids_are_canonically_equal() {
        let from_number: EntityId = serde_json::from_value(json!(7)).unwrap();
        let from_string: EntityId = serde_json::from_value(json!("7")).unwrap();
        assert_eq!(from_number, from_string);
        assert_eq!(from_number.as_str(), "7");
    }

    #[test]
    fn null_id_is_empty() {
        let id: EntityId = serde_json::from_value(json!(null)).unwrap();
        assert!(id.is_empty());
    }

    #[test]
    fn lease_rent_coerces_from_string_and_defaults_to_zero() {
        let lease: Lease = serde_json::from_value(json!({
            "id": 1,
            "unit_id": "2",
            "tenant_id": 3,
            "monthly_rent": "1250.50"
        }))
        .unwrap();
        assert_eq!(lease.monthly_rent, 1250.50);

        let missing: Lease = serde_json::from_value(json!({ "id": 2 })).unwrap();
        assert_eq!(missing.monthly_rent, 0.0);
        assert!(missing.unit_id.is_empty());

        let garbage: Lease = serde_json::from_value(json!({
            "id": 3,
            "monthly_rent": "n/a"
        }))
        .unwrap();
        assert_eq!(garbage.monthly_rent, 0.0);
    }

    #[test]
    fn payment_amount_coerces_from_null() {
        let payment: Payment = serde_json::from_value(json!({
            "id": 10,
            "lease_id": 1,
            "amount": null,
            "payment_date": "2026-03-05"
        }))
        .unwrap();
        assert_eq!(payment.amount, 0.0);
    }

    #[test]
    fn unit_numeric_fields_tolerate_strings() {
        let unit: Unit = serde_json::from_value(json!({
            "id": 4,
            "property_id": 1,
            "unit_number": "3B",
            "bedrooms": "2",
            "bathrooms": 1.5,
            "sq_ft": "oops"
        }))
        .unwrap();
        assert_eq!(unit.bedrooms, Some(2.0));
        assert_eq!(unit.bathrooms, Some(1.5));
        assert_eq!(unit.sq_ft, None);
    }
}
