//! Request payload access
//!
//! A [`Payload`] is the JSON object nested under the request envelope's `data`
//! key. Guards and terminal steps read fields through the same accessors, so a
//! field that passed its guard is read back identically when the record is
//! built.
//!
//! All accessors are strict: no truthiness, no string-to-number coercion.

use serde_json::{Map, Value};

/// JSON object carried under `data`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payload(Map<String, Value>);

impl Payload {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Raw field, `None` when absent
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Field present and not JSON `null`
    pub fn has(&self, field: &str) -> bool {
        !matches!(self.0.get(field), None | Some(Value::Null))
    }

    /// String field with at least one non-whitespace character
    pub fn text(&self, field: &str) -> Option<&str> {
        self.0
            .get(field)
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
    }

    /// Integer field strictly greater than zero
    pub fn positive_integer(&self, field: &str) -> Option<u64> {
        self.0.get(field).and_then(positive_integer)
    }

    /// Non-empty array field
    pub fn non_empty_array(&self, field: &str) -> Option<&Vec<Value>> {
        self.0
            .get(field)
            .and_then(Value::as_array)
            .filter(|items| !items.is_empty())
    }
}

impl From<Map<String, Value>> for Payload {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// JSON integer > 0. Floats (even `5.0`), strings and booleans are rejected.
pub fn positive_integer(value: &Value) -> Option<u64> {
    value.as_u64().filter(|n| *n > 0)
}

#[cfg(test)]
pub(crate) fn payload(value: Value) -> Payload {
    match value {
        Value::Object(map) => Payload::new(map),
        other => panic!("test payload must be an object, got {other}"),
    }
}
