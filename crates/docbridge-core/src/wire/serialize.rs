use super::{WireDocument, WireValue, BINARY_KEY, DATE_KEY};
use crate::stmt::{Document, Value};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::Number;

/// Converts a mapping-layer value into its wire form.
pub fn serialize(value: &Value) -> WireValue {
    match value {
        Value::Null => WireValue::Null,
        Value::Bool(v) => WireValue::Bool(*v),
        Value::I32(v) => WireValue::from(*v),
        Value::I64(v) => WireValue::from(*v),
        Value::F64(v) => float(*v),
        Value::String(v) => WireValue::String(v.clone()),
        Value::ObjectId(v) => WireValue::String(v.to_hex()),
        Value::Uuid(v) => WireValue::String(v.hyphenated().to_string()),
        Value::Decimal(v) => WireValue::String(v.to_string()),
        Value::BigInt(v) => WireValue::String(v.to_string()),
        Value::Binary(v) => match v.as_uuid() {
            Some(uuid) => WireValue::String(uuid.hyphenated().to_string()),
            None => tagged(BINARY_KEY, WireValue::String(STANDARD.encode(&v.bytes))),
        },
        Value::Date(v) => tagged(DATE_KEY, WireValue::from(v.timestamp_millis())),
        Value::Array(items) | Value::Set(items) => {
            WireValue::Array(items.iter().map(serialize).collect())
        }
        Value::Document(doc) => WireValue::Object(serialize_document(doc)),
        Value::Map(map) => WireValue::Object(
            map.iter()
                .map(|(key, value)| (key.clone(), serialize(value)))
                .collect(),
        ),
        Value::Vector(items) => {
            WireValue::Array(items.iter().map(|v| float(*v as f64)).collect())
        }
        Value::Custom(custom) => serialize(&custom.to_wire()),
    }
}

/// Serializes every field of a document, preserving field order.
pub fn serialize_document(doc: &Document) -> WireDocument {
    doc.iter()
        .map(|(key, value)| (key.clone(), serialize(value)))
        .collect()
}

/// Serializes a query filter. Operators such as `$in` or `$eq` recurse like
/// any other document.
pub fn serialize_filter(filter: &Document) -> WireDocument {
    serialize_document(filter)
}

/// Serializes an update. Top-level keys that are not update operators are
/// gathered under `$set`, so a plain field document reads as a partial
/// update.
pub fn serialize_update(update: &Document) -> WireDocument {
    let mut wire = WireDocument::new();
    let mut implicit_set = WireDocument::new();

    for (key, value) in update.iter() {
        if key.starts_with('$') {
            wire.insert(key.clone(), serialize(value));
        } else {
            implicit_set.insert(key.clone(), serialize(value));
        }
    }

    if !implicit_set.is_empty() {
        match wire.get_mut("$set") {
            Some(WireValue::Object(set)) => set.extend(implicit_set),
            _ => {
                wire.insert("$set".to_string(), WireValue::Object(implicit_set));
            }
        }
    }

    wire
}

fn float(v: f64) -> WireValue {
    Number::from_f64(v)
        .map(WireValue::Number)
        .unwrap_or(WireValue::Null)
}

fn tagged(key: &str, value: WireValue) -> WireValue {
    let mut object = WireDocument::new();
    object.insert(key.to_string(), value);
    WireValue::Object(object)
}
