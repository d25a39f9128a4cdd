//! Untyped row as returned by the data API

use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::Value;
use crate::error::DecodeError;

/// A row from the data API before it is decoded into a typed struct.
///
/// Records hold the JSON object exactly as the API returned it. Pages decode
/// them at the fetch boundary with [`Record::decode`], so loosely-shaped data
/// never reaches rendering code.
///
/// # Example
///
/// ```
/// use ventures_lib::model::Record;
///
/// let record = Record::new()
///     .set("name", "Demo Day")
///     .set("capacity", 120i64);
///
/// assert_eq!(record.get_value("capacity").to_string(), "120");
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: serde_json::Map<String, serde_json::Value>,
}

impl Record {
    /// Creates a new empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Encodes a typed value as a record.
    ///
    /// Fails if the value does not serialize to a JSON object.
    pub fn encode<T: Serialize>(value: &T) -> Result<Self, DecodeError> {
        match serde_json::to_value(value).map_err(DecodeError::Encode)? {
            serde_json::Value::Object(fields) => Ok(Self { fields }),
            other => Err(DecodeError::Encode(serde::ser::Error::custom(format!(
                "expected an object, got {}",
                other
            )))),
        }
    }

    /// Decodes this record into a typed row.
    ///
    /// `collection` only labels the error.
    pub fn decode<T: DeserializeOwned>(&self, collection: &str) -> Result<T, DecodeError> {
        serde_json::from_value(serde_json::Value::Object(self.fields.clone()))
            .map_err(|e| DecodeError::row(collection, e))
    }

    // =========================================================================
    // Field access
    // =========================================================================

    /// Returns the raw JSON for a field, if it exists.
    pub fn get(&self, field: &str) -> Option<&serde_json::Value> {
        self.fields.get(field)
    }

    /// Returns the field as a [`Value`], `Null` when absent.
    pub fn get_value(&self, field: &str) -> Value {
        self.fields
            .get(field)
            .map(Value::from_json)
            .unwrap_or(Value::Null)
    }

    /// Returns the field, failing when it is absent.
    pub fn require(&self, field: &str) -> Result<Value, DecodeError> {
        self.fields
            .get(field)
            .map(Value::from_json)
            .ok_or_else(|| DecodeError::missing(field))
    }

    /// Returns `true` if the record contains the given field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns the field names in the record.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Returns `true` if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    // =========================================================================
    // Setters
    // =========================================================================

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    /// Inserts a field value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into().to_json());
    }

    /// Inserts raw JSON for a field.
    pub fn insert_json(&mut self, field: impl Into<String>, value: serde_json::Value) {
        self.fields.insert(field.into(), value);
    }

    /// Copies every field of `changes` over this record.
    pub fn merge(&mut self, changes: &Record) {
        for (key, value) in &changes.fields {
            self.fields.insert(key.clone(), value.clone());
        }
    }

    /// Keeps only the named fields.
    pub fn retain_fields(&mut self, names: &[&str]) {
        self.fields.retain(|key, _| names.contains(&key.as_str()));
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for Record {
    fn from(fields: serde_json::Map<String, serde_json::Value>) -> Self {
        Self { fields }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Registration {
        id: i64,
        event_id: Option<i64>,
        attendee: String,
    }

    #[test]
    fn test_decode_typed_row() {
        let record: Record =
            serde_json::from_str(r#"{"id": 4, "event_id": 1, "attendee": "Ada"}"#).unwrap();
        let row: Registration = record.decode("registrations").unwrap();
        assert_eq!(
            row,
            Registration {
                id: 4,
                event_id: Some(1),
                attendee: "Ada".into()
            }
        );
    }

    #[test]
    fn test_decode_reports_collection() {
        let record = Record::new().set("id", "not-a-number");
        let err = record.decode::<Registration>("registrations").unwrap_err();
        assert!(err.to_string().contains("registrations"));
    }

    #[test]
    fn test_encode_and_merge() {
        let mut record = Record::encode(&Registration {
            id: 1,
            event_id: None,
            attendee: "Grace".into(),
        })
        .unwrap();
        record.merge(&Record::new().set("attendee", "Grace H."));

        assert_eq!(record.get_value("attendee"), Value::Text("Grace H.".into()));
        assert!(record.get_value("event_id").is_null());
    }

    #[test]
    fn test_encode_rejects_non_objects() {
        assert!(Record::encode(&5).is_err());
    }

    #[test]
    fn test_require_missing_field() {
        let err = Record::new().require("id").unwrap_err();
        assert_eq!(err.to_string(), "Field 'id' not found in record");
    }
}
