//! Conversions between decoded JSON payloads and [`Document`]s.

use serde_json::{Map, Number};

use crate::{Document, Value};

impl From<serde_json::Value> for Document {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Document::Value(Value::Null),
            serde_json::Value::Bool(b) => Document::Value(Value::Bool(b)),
            serde_json::Value::Number(n) => Document::Value(number_to_value(&n)),
            serde_json::Value::String(s) => Document::Value(Value::String(s)),
            serde_json::Value::Array(items) => {
                Document::List(items.into_iter().map(Document::from).collect())
            }
            serde_json::Value::Object(map) => Document::Map(
                map.into_iter()
                    .map(|(key, value)| (key, Document::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<Document> for serde_json::Value {
    fn from(document: Document) -> Self {
        match document {
            Document::Value(value) => value.into(),
            Document::List(items) => {
                serde_json::Value::Array(items.into_iter().map(Into::into).collect())
            }
            Document::Map(map) => serde_json::Value::Object(
                map.into_iter()
                    .map(|(key, value)| (key, value.into()))
                    .collect::<Map<_, _>>(),
            ),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Int(n) => serde_json::Value::Number(n.into()),
            // NaN and infinities have no JSON form.
            Value::Float(f) => Number::from_f64(f).map_or(serde_json::Value::Null, serde_json::Value::Number),
            Value::String(s) => serde_json::Value::String(s),
        }
    }
}

// Integers that fit i64 stay integers; everything else becomes a float.
fn number_to_value(n: &Number) -> Value {
    match n.as_i64() {
        Some(i) => Value::Int(i),
        None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
    }
}
