use std::fmt;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// Standard `{ success, data }` envelope wrapping every backend response
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Patient directory entry as returned by `GET /patients`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PatientRecord {
    pub id: i64,
    pub patient_id: String,
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: Option<String>,
}

/// Catalog entry as returned by `GET /tests`
#[derive(Debug, Clone, Deserialize)]
pub struct TestRecord {
    pub id: i64,
    pub name: String,
    #[serde(deserialize_with = "decimal_from_wire")]
    pub price: Decimal,
}

/// One billed line on a bill payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillItemPayload {
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: String,
    #[serde(deserialize_with = "decimal_from_wire")]
    pub unit_price: Decimal,
}

/// Request body for `POST /bills` and `PUT /bills/{id}`
///
/// Totals are computed client-side and echoed to the server; they are
/// never treated as stored state on this side of the wire.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillPayload {
    pub patient_id: Option<i64>,
    pub items: Vec<BillItemPayload>,
    pub discount_amount: Decimal,
    pub amount_received: Decimal,
    pub payment_mode: Option<String>,
    pub notes: Option<String>,
    pub status: String,
    pub sub_total: Decimal,
    pub grand_total: Decimal,
    pub amount_due: Decimal,
}

/// Bill as returned by the server
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillRecord {
    pub id: i64,
    pub patient_id: Option<i64>,
    pub items: Vec<BillItemPayload>,
    #[serde(deserialize_with = "decimal_from_wire")]
    pub discount_amount: Decimal,
    #[serde(deserialize_with = "decimal_from_wire")]
    pub amount_received: Decimal,
    pub payment_mode: Option<String>,
    pub notes: Option<String>,
    pub status: String,
    #[serde(deserialize_with = "decimal_from_wire")]
    pub sub_total: Decimal,
    #[serde(deserialize_with = "decimal_from_wire")]
    pub grand_total: Decimal,
    #[serde(deserialize_with = "decimal_from_wire")]
    pub amount_due: Decimal,
}

/// Request body for `POST /test-packages`
///
/// `selected_tests` carries backend ids only; session-local display ids
/// never cross the wire.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestPackagePayload {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_code: Option<String>,
    pub price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub selected_tests: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_seed: Option<String>,
}

/// Test package as returned by the server
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestPackageRecord {
    pub id: i64,
    pub name: String,
    #[serde(deserialize_with = "decimal_from_wire")]
    pub price: Decimal,
}

/// Parses a monetary field that may arrive as a JSON number or a
/// string-encoded number (the backend emits both).
pub fn decimal_from_wire<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    struct WireAmount;

    impl de::Visitor<'_> for WireAmount {
        type Value = Decimal;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a decimal amount as a number or string")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Decimal, E> {
            v.trim()
                .parse::<Decimal>()
                .map_err(|e| E::custom(format!("invalid amount {v:?}: {e}")))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Decimal, E> {
            Decimal::from_f64(v)
                .ok_or_else(|| E::custom(format!("amount {v} is not representable")))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Decimal, E> {
            Ok(Decimal::from(v))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Decimal, E> {
            Ok(Decimal::from(v))
        }
    }

    deserializer.deserialize_any(WireAmount)
}
