//! Historical event records.
//!
//! The cloud function wraps the list in an envelope:
//!
//! ```text
//! { "code": 200, "count": 2, "page": null, "data": [ {..}, {..} ] }
//! ```
//!
//! Each entry is a Parse object, so it carries `createdAt`/`updatedAt`
//! timestamps (RFC 3339), an `objectId`, a `__type` tag and a `className`.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use super::data_item::json_kind;
use super::{contains_ignore_case, Record};
use crate::error::{GatewayError, Result};

/// A single historical event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HistoricalItem {
    /// Free-form date of the event as the backend formats it (e.g. "-44/03/15").
    pub date: String,
    pub description: String,
    #[serde(rename = "lang")]
    pub language: String,
    #[serde(rename = "category1")]
    pub category_primary: String,
    #[serde(rename = "category2")]
    pub category_secondary: String,
    /// e.g. "year", "month", "day".
    pub granularity: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "objectId")]
    pub object_id: String,
    #[serde(rename = "__type")]
    pub type_tag: String,
    #[serde(rename = "className")]
    pub class_name: String,
}

/// The `result` payload of the historical listing function.
#[derive(Debug, Deserialize)]
struct Envelope {
    code: i64,
    count: i64,
    #[serde(default)]
    page: Option<String>,
    data: Vec<Value>,
}

impl Record for HistoricalItem {
    const FUNCTION: &'static str = "consultarHistoricos";
    const NOUN: &'static str = "historical events";

    fn entries(payload: Value) -> Result<Vec<Value>> {
        if !payload.is_object() {
            return Err(GatewayError::UnexpectedShape(format!(
                "expected a result envelope object, got {}",
                json_kind(&payload)
            )));
        }
        let envelope: Envelope = serde_json::from_value(payload)
            .map_err(|e| GatewayError::UnexpectedShape(format!("bad result envelope: {e}")))?;

        tracing::debug!(
            code = envelope.code,
            count = envelope.count,
            page = envelope.page.as_deref().unwrap_or("-"),
            entries = envelope.data.len(),
            "historical envelope decoded"
        );
        Ok(envelope.data)
    }

    fn decode(entry: Value) -> std::result::Result<Self, String> {
        serde_json::from_value(entry).map_err(|e| e.to_string())
    }

    fn matches(&self, needle: &str) -> bool {
        contains_ignore_case(&self.description, needle)
            || contains_ignore_case(&self.category_primary, needle)
            || contains_ignore_case(&self.category_secondary, needle)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    pub fn entry(object_id: &str, description: &str) -> Value {
        json!({
            "date": "1492/10/12",
            "description": description,
            "lang": "es",
            "category1": "By place",
            "category2": "Americas",
            "granularity": "year",
            "createdAt": "2024-05-01T10:00:00.000Z",
            "updatedAt": "2024-05-02T11:30:00.000Z",
            "objectId": object_id,
            "__type": "Object",
            "className": "Historical",
        })
    }

    #[test]
    fn decode_reads_renamed_fields_and_timestamps() {
        let item = HistoricalItem::decode(entry("abc123", "Landfall")).unwrap();

        assert_eq!(item.object_id, "abc123");
        assert_eq!(item.language, "es");
        assert_eq!(item.category_primary, "By place");
        assert_eq!(item.category_secondary, "Americas");
        assert_eq!(item.type_tag, "Object");
        assert_eq!(item.class_name, "Historical");
        assert_eq!(item.created_at, Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap());
        assert_eq!(item.updated_at, Utc.with_ymd_and_hms(2024, 5, 2, 11, 30, 0).unwrap());
    }

    #[test]
    fn decode_rejects_malformed_timestamp() {
        let mut raw = entry("x", "Bad date");
        raw["createdAt"] = json!("yesterday-ish");
        assert!(HistoricalItem::decode(raw).is_err());
    }

    #[test]
    fn entries_unwraps_envelope() {
        let payload = json!({
            "code": 200,
            "count": 1,
            "page": null,
            "data": [entry("a", "One")],
        });
        let entries = HistoricalItem::entries(payload).unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn entries_rejects_bare_array() {
        let err = HistoricalItem::entries(json!([entry("a", "One")])).unwrap_err();
        assert!(matches!(err, GatewayError::UnexpectedShape(_)));
    }

    #[test]
    fn entries_rejects_envelope_without_data() {
        let err = HistoricalItem::entries(json!({"code": 200, "count": 0})).unwrap_err();
        assert!(matches!(err, GatewayError::UnexpectedShape(_)));
    }

    #[test]
    fn matches_description_and_categories_only() {
        let item = HistoricalItem::decode(entry("a", "Columbus reaches the Bahamas")).unwrap();
        assert!(item.matches("bahamas"));
        assert!(item.matches("by place"));
        assert!(item.matches("americas"));
        assert!(!item.matches("historical"), "class name is not searchable");
    }
}
