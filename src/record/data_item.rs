//! The plain `{id, name, description}` record.
//!
//! On the wire every entry is a string-keyed map of strings, including the
//! id, which must parse as an integer.

use serde::Deserialize;
use serde_json::Value;

use super::{contains_ignore_case, Record};
use crate::error::{GatewayError, Result};

/// One row of the generic data listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataItem {
    pub id: i64,
    pub name: String,
    pub description: String,
}

#[derive(Deserialize)]
struct RawDataItem {
    id: String,
    name: String,
    description: String,
}

impl Record for DataItem {
    const FUNCTION: &'static str = "consultarDatos";
    const NOUN: &'static str = "data";

    fn entries(payload: Value) -> Result<Vec<Value>> {
        match payload {
            Value::Array(entries) => Ok(entries),
            other => Err(GatewayError::UnexpectedShape(format!(
                "expected an array of entries, got {}",
                json_kind(&other)
            ))),
        }
    }

    fn decode(entry: Value) -> std::result::Result<Self, String> {
        let raw: RawDataItem = serde_json::from_value(entry).map_err(|e| e.to_string())?;
        let id = raw
            .id
            .parse::<i64>()
            .map_err(|_| format!("id {:?} is not an integer", raw.id))?;

        Ok(Self {
            id,
            name: raw.name,
            description: raw.description,
        })
    }

    fn matches(&self, needle: &str) -> bool {
        contains_ignore_case(&self.name, needle) || contains_ignore_case(&self.description, needle)
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
