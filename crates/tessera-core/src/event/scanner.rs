use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::event::error::WireError;

/// Reads declared event fields out of a request payload.
///
/// Required fields fail on absence; optional fields tolerate absence (and an
/// explicit `null`). A present value of the wrong shape fails either way.
#[derive(Debug, Clone, Copy)]
pub struct ParameterScanner<'a> {
    payload: &'a Map<String, Value>,
}

impl<'a> ParameterScanner<'a> {
    pub fn new(payload: &'a Map<String, Value>) -> Self {
        Self { payload }
    }

    /// The full payload map.
    pub fn payload(&self) -> &'a Map<String, Value> {
        self.payload
    }

    pub fn contains(&self, field: &str) -> bool {
        self.payload.contains_key(field)
    }

    /// Read a field that must be present.
    pub fn required<T: DeserializeOwned>(&self, field: &str) -> Result<T, WireError> {
        match self.payload.get(field) {
            Some(value) => decode(field, value),
            None => Err(WireError::MissingField { field: field.to_string() }),
        }
    }

    /// Read a field that may be absent.
    pub fn optional<T: DeserializeOwned>(&self, field: &str) -> Result<Option<T>, WireError> {
        match self.payload.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => decode(field, value).map(Some),
        }
    }

    /// Read a field that may be absent, falling back to `T::default()`.
    pub fn optional_or_default<T: DeserializeOwned + Default>(&self, field: &str) -> Result<T, WireError> {
        Ok(self.optional(field)?.unwrap_or_default())
    }
}

fn decode<T: DeserializeOwned>(field: &str, value: &Value) -> Result<T, WireError> {
    T::deserialize(value).map_err(|source| WireError::InvalidField {
        field: field.to_string(),
        source,
    })
}
