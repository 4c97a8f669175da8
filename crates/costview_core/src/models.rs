//! Cost entities as served by the cost backend.
//!
//! Decoding is deliberately forgiving: a record with a `null` department or a
//! cost sent as a string still decodes, so the views never have to deal with
//! half-parsed data.

use std::borrow::Cow;
use std::fmt;

use serde::de::{Deserializer, Error as _, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Costs strictly above this amount are shown in the high-cost state.
pub const HIGH_COST_THRESHOLD: f64 = 1000.0;

/// One billed cloud-resource usage line item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostRecord {
    /// Backend-assigned identifier, unique within a record set
    #[serde(deserialize_with = "lenient_id")]
    pub id: i64,
    /// Cloud provider name (e.g., "AWS", "Azure", "GCP")
    #[serde(default, deserialize_with = "lenient_string")]
    pub cloud_provider: String,
    /// Service name (e.g., "EC2", "Cloud SQL")
    #[serde(default, deserialize_with = "lenient_string")]
    pub service_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub resource_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub resource_name: String,
    /// Amount billed, expressed in `currency`; `None` when the backend sent
    /// no usable amount
    #[serde(default, deserialize_with = "lenient_optional_amount")]
    pub cost: Option<f64>,
    /// ISO 4217 currency code
    #[serde(default, deserialize_with = "lenient_string")]
    pub currency: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub region: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub account_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub department: String,
    /// Deployment environment (e.g., "production", "staging")
    #[serde(default, deserialize_with = "lenient_string")]
    pub environment: String,
    /// ISO-8601 usage timestamp, kept verbatim
    #[serde(default, deserialize_with = "lenient_string")]
    pub usage_date: String,
    /// ISO-8601 creation timestamp, kept verbatim
    #[serde(default, deserialize_with = "lenient_string")]
    pub created_at: String,
}

impl CostRecord {
    /// Billed amount for numeric use; an absent cost counts as 0.
    pub fn amount(&self) -> f64 {
        self.cost.unwrap_or(0.0)
    }

    /// Whether this record is rendered in the high-cost state.
    pub fn is_high_cost(&self) -> bool {
        self.amount() > HIGH_COST_THRESHOLD
    }

    /// Every field value as the search filter sees it, in wire order.
    ///
    /// Numbers use their plain decimal form (`1247.5`, not `$1,247.50`).
    /// Empty fields and an absent cost contribute nothing.
    pub fn searchable_values(&self) -> Vec<Cow<'_, str>> {
        let mut values = Vec::with_capacity(13);
        values.push(Cow::Owned(self.id.to_string()));
        push_present(&mut values, &self.cloud_provider);
        push_present(&mut values, &self.service_name);
        push_present(&mut values, &self.resource_id);
        push_present(&mut values, &self.resource_name);
        if let Some(cost) = self.cost {
            values.push(Cow::Owned(cost.to_string()));
        }
        push_present(&mut values, &self.currency);
        push_present(&mut values, &self.region);
        push_present(&mut values, &self.account_id);
        push_present(&mut values, &self.department);
        push_present(&mut values, &self.environment);
        push_present(&mut values, &self.usage_date);
        push_present(&mut values, &self.created_at);
        values
    }
}

fn push_present<'a>(values: &mut Vec<Cow<'a, str>>, field: &'a str) {
    if !field.is_empty() {
        values.push(Cow::Borrowed(field));
    }
}

/// Precomputed aggregate snapshot supplied by the backend.
///
/// Trusted as-is: it is never recomputed or cross-checked against the
/// record list fetched alongside it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostSummary {
    #[serde(default, deserialize_with = "lenient_amount")]
    pub total_cost: f64,
    /// Display currency for the totals
    #[serde(default, deserialize_with = "lenient_string")]
    pub currency: String,
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_records: u64,
    #[serde(default)]
    pub cost_by_provider: CostBreakdown,
    #[serde(default)]
    pub cost_by_service: CostBreakdown,
}

/// Records and summary produced by one refresh.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CostSnapshot {
    pub records: Vec<CostRecord>,
    pub summary: CostSummary,
}

impl CostSnapshot {
    pub fn new(records: Vec<CostRecord>, summary: CostSummary) -> Self {
        Self { records, summary }
    }
}

/// Name to amount mapping that keeps the order the backend sent it in.
///
/// Iteration order is the tie-break for top-N selection, so it has to
/// survive decoding. A repeated key keeps its first position and takes the
/// last value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CostBreakdown {
    entries: Vec<(String, f64)>,
}

impl CostBreakdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite an entry, keeping the original position on overwrite.
    pub fn insert(&mut self, name: impl Into<String>, amount: f64) {
        let name = name.into();
        let amount = finite_or_zero(amount);
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = amount,
            None => self.entries.push((name, amount)),
        }
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, amount: f64) -> Self {
        self.insert(name, amount);
        self
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, amount)| *amount)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries
            .iter()
            .map(|(name, amount)| (name.as_str(), *amount))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all amounts.
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, amount)| amount).sum()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for CostBreakdown {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut breakdown = Self::new();
        for (name, amount) in iter {
            breakdown.insert(name, amount);
        }
        breakdown
    }
}

impl Serialize for CostBreakdown {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, amount) in &self.entries {
            map.serialize_entry(name, amount)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CostBreakdown {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(BreakdownVisitor)
    }
}

struct BreakdownVisitor;

impl<'de> Visitor<'de> for BreakdownVisitor {
    type Value = CostBreakdown;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object mapping names to amounts")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut breakdown = CostBreakdown::new();
        while let Some((name, value)) = access.next_entry::<String, Value>()? {
            breakdown.insert(name, coerce_amount(&value));
        }
        Ok(breakdown)
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E> {
        Ok(CostBreakdown::new())
    }

    fn visit_none<E>(self) -> Result<Self::Value, E> {
        Ok(CostBreakdown::new())
    }
}

/// Coerce a JSON value to a finite amount; anything unusable becomes 0.
pub(crate) fn coerce_amount(value: &Value) -> f64 {
    parse_amount(value).unwrap_or(0.0)
}

/// A finite amount from a number or numeric string, if there is one.
fn parse_amount(value: &Value) -> Option<f64> {
    let amount = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    amount.map(finite_or_zero)
}

fn finite_or_zero(amount: f64) -> f64 {
    if amount.is_finite() {
        amount
    } else {
        0.0
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text,
        Some(other) => other.to_string(),
    })
}

fn lenient_amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<Value>::deserialize(deserializer)?
        .map(|value| coerce_amount(&value))
        .unwrap_or(0.0))
}

fn lenient_optional_amount<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<f64>, D::Error> {
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(|value| parse_amount(&value)))
}

/// Ids arrive as integers, but a numeric string is accepted too.
fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let id = match &value {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    };
    id.ok_or_else(|| D::Error::custom(format!("invalid record id: {}", value)))
}

fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let count = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(number)) => number
            .as_u64()
            .or_else(|| number.as_f64().filter(|n| *n >= 0.0).map(|n| n as u64)),
        Some(Value::String(text)) => text.trim().parse::<u64>().ok(),
        _ => None,
    };
    Ok(count.unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_decodes_backend_shape() {
        let record: CostRecord = serde_json::from_value(json!({
            "id": 7,
            "cloudProvider": "AWS",
            "serviceName": "EC2",
            "resourceId": "i-1234567890abcdef0",
            "resourceName": "production-web-server-1",
            "cost": 1247.50,
            "currency": "USD",
            "region": "us-east-1",
            "accountId": "123456789012",
            "department": "Engineering",
            "environment": "production",
            "usageDate": "2024-01-05T15:45:00",
            "createdAt": "2024-01-06T08:00:00"
        }))
        .unwrap();

        assert_eq!(record.id, 7);
        assert_eq!(record.service_name, "EC2");
        assert_eq!(record.cost, Some(1247.5));
        assert_eq!(record.usage_date, "2024-01-05T15:45:00");
        assert!(record.is_high_cost());
    }

    #[test]
    fn test_record_tolerates_missing_and_null_fields() {
        let record: CostRecord = serde_json::from_value(json!({
            "id": 3,
            "cloudProvider": "GCP",
            "cost": null,
            "region": null,
            "department": 42
        }))
        .unwrap();

        assert_eq!(record.cost, None);
        assert_eq!(record.amount(), 0.0);
        assert_eq!(record.region, "");
        assert_eq!(record.environment, "");
        assert_eq!(record.department, "42");
        assert!(!record.is_high_cost());
    }

    #[test]
    fn test_cost_accepts_numeric_string() {
        let record: CostRecord =
            serde_json::from_value(json!({ "id": 1, "cost": "523.75" })).unwrap();
        assert_eq!(record.cost, Some(523.75));

        let record: CostRecord =
            serde_json::from_value(json!({ "id": 1, "cost": "lots" })).unwrap();
        assert_eq!(record.cost, None);
        assert_eq!(record.amount(), 0.0);
    }

    #[test]
    fn test_high_cost_threshold_is_exclusive() {
        let at_threshold = CostRecord {
            cost: Some(1000.0),
            ..Default::default()
        };
        let above = CostRecord {
            cost: Some(1000.01),
            ..Default::default()
        };
        assert!(!at_threshold.is_high_cost());
        assert!(above.is_high_cost());
    }

    #[test]
    fn test_searchable_values_skip_empty_fields() {
        let record = CostRecord {
            id: 12,
            cloud_provider: "Azure".into(),
            cost: Some(1200.0),
            ..Default::default()
        };
        let values: Vec<String> = record
            .searchable_values()
            .into_iter()
            .map(|v| v.into_owned())
            .collect();
        assert_eq!(values, vec!["12", "Azure", "1200"]);
    }

    #[test]
    fn test_absent_cost_is_not_searchable() {
        let record: CostRecord =
            serde_json::from_str(r#"{"id":7,"cloudProvider":"AWS","serviceName":"EC2"}"#).unwrap();
        let values: Vec<String> = record
            .searchable_values()
            .into_iter()
            .map(|v| v.into_owned())
            .collect();
        assert_eq!(values, vec!["7", "AWS", "EC2"]);

        let zero: CostRecord = serde_json::from_value(json!({ "id": 8, "cost": 0 })).unwrap();
        assert!(zero.searchable_values().iter().any(|v| v == "0"));
    }

    #[test]
    fn test_id_accepts_numeric_string() {
        let record: CostRecord = serde_json::from_value(json!({ "id": "42" })).unwrap();
        assert_eq!(record.id, 42);
    }

    #[test]
    fn test_unusable_id_is_rejected() {
        assert!(serde_json::from_value::<CostRecord>(json!({ "cost": 5 })).is_err());
        assert!(serde_json::from_value::<CostRecord>(json!({ "id": null })).is_err());
        assert!(serde_json::from_value::<CostRecord>(json!({ "id": "abc" })).is_err());
    }

    #[test]
    fn test_summary_preserves_breakdown_order() {
        let summary: CostSummary = serde_json::from_str(
            r#"{
                "totalCost": "1500.5",
                "currency": "USD",
                "totalRecords": 3,
                "costByProvider": {"GCP": 100, "AWS": "900.5", "Azure": 500},
                "costByService": null
            }"#,
        )
        .unwrap();

        assert_eq!(summary.total_cost, 1500.5);
        assert_eq!(summary.total_records, 3);
        let names: Vec<&str> = summary.cost_by_provider.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["GCP", "AWS", "Azure"]);
        assert_eq!(summary.cost_by_provider.get("AWS"), Some(900.5));
        assert!(summary.cost_by_service.is_empty());
    }

    #[test]
    fn test_summary_defaults_when_fields_missing() {
        let summary: CostSummary = serde_json::from_str("{}").unwrap();
        assert_eq!(summary, CostSummary::default());
    }

    #[test]
    fn test_breakdown_duplicate_key_keeps_first_position() {
        let breakdown = CostBreakdown::new()
            .with("EC2", 10.0)
            .with("S3", 5.0)
            .with("EC2", 20.0);

        let entries: Vec<(&str, f64)> = breakdown.iter().collect();
        assert_eq!(entries, vec![("EC2", 20.0), ("S3", 5.0)]);
        assert_eq!(breakdown.total(), 25.0);
    }

    #[test]
    fn test_breakdown_serializes_in_order() {
        let breakdown: CostBreakdown = [("Lambda", 1.5), ("EC2", 3.0)].into_iter().collect();
        let json = serde_json::to_string(&breakdown).unwrap();
        assert_eq!(json, r#"{"Lambda":1.5,"EC2":3.0}"#);
    }
}
