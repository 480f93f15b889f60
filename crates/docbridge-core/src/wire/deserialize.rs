use super::{
    WireDocument, WireValue, BINARY_KEY, DATE_KEY, OBJECT_ID_KEY, UUID_KEY, VECTOR_KEY,
};
use crate::{
    schema::app::{FieldTy, Schema},
    stmt::{Binary, Document, ObjectId, Value},
    Error, Result,
};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{TimeZone, Utc};
use indexmap::{IndexMap, IndexSet};

/// Converts wire documents back into mapping-layer documents.
///
/// Top-level fields known to hold vectors, maps or sets are reshaped into
/// [`Value::Vector`], [`Value::Map`] and [`Value::Set`]. The raw wire document
/// is consumed; its map and vector fields are moved rather than copied.
#[derive(Debug, Default, Clone)]
pub struct Deserializer {
    vector_fields: IndexSet<String>,
    map_fields: IndexSet<String>,
    set_fields: IndexSet<String>,
}

impl Deserializer {
    pub fn new() -> Deserializer {
        Deserializer::default()
    }

    /// Derives the field reshaping rules from a schema.
    pub fn for_schema(schema: &Schema) -> Deserializer {
        let mut deserializer = Deserializer::new();

        for field in schema.fields() {
            if field.path.contains('.') {
                continue;
            }

            match &field.ty {
                FieldTy::Vectorize(_) => {
                    deserializer.vector_fields.insert(field.path.clone());
                }
                FieldTy::Array(array) if array.dimension.is_some() => {
                    deserializer.vector_fields.insert(field.path.clone());
                }
                FieldTy::Map(_) => {
                    deserializer.map_fields.insert(field.path.clone());
                }
                FieldTy::Set(_) => {
                    deserializer.set_fields.insert(field.path.clone());
                }
                _ => {}
            }
        }

        deserializer
    }

    pub fn vector_field(mut self, name: impl Into<String>) -> Deserializer {
        self.vector_fields.insert(name.into());
        self
    }

    pub fn map_field(mut self, name: impl Into<String>) -> Deserializer {
        self.map_fields.insert(name.into());
        self
    }

    pub fn set_field(mut self, name: impl Into<String>) -> Deserializer {
        self.set_fields.insert(name.into());
        self
    }

    /// Deserializes a top-level wire document.
    pub fn deserialize_document(&self, wire: WireValue) -> Result<Document> {
        match wire {
            WireValue::Object(object) => Ok(self.document(object)),
            other => Err(Error::invalid_result(format!(
                "expected a document, got {other}"
            ))),
        }
    }

    fn document(&self, object: WireDocument) -> Document {
        object
            .into_iter()
            .map(|(key, value)| {
                let value = if key == VECTOR_KEY || self.vector_fields.contains(&key) {
                    vector(value)
                } else if self.map_fields.contains(&key) {
                    match value {
                        WireValue::Object(object) => Value::Map(
                            object
                                .into_iter()
                                .map(|(k, v)| (k, deserialize(v)))
                                .collect::<IndexMap<_, _>>(),
                        ),
                        other => deserialize(other),
                    }
                } else if self.set_fields.contains(&key) {
                    match value {
                        WireValue::Array(items) => {
                            Value::Set(items.into_iter().map(deserialize).collect())
                        }
                        other => deserialize(other),
                    }
                } else {
                    deserialize(value)
                };

                (key, value)
            })
            .collect()
    }
}

/// Converts a wire value into a mapping-layer value without any schema
/// knowledge.
pub fn deserialize(wire: WireValue) -> Value {
    match wire {
        WireValue::Null => Value::Null,
        WireValue::Bool(v) => Value::Bool(v),
        WireValue::Number(n) => match n.as_i64() {
            Some(v) => Value::I64(v),
            None => Value::F64(n.as_f64().unwrap_or(f64::NAN)),
        },
        WireValue::String(v) => Value::String(v),
        WireValue::Array(items) => Value::Array(items.into_iter().map(deserialize).collect()),
        WireValue::Object(object) => match tagged(&object) {
            Some(value) => value,
            None => Value::Document(
                object
                    .into_iter()
                    .map(|(key, value)| (key, deserialize(value)))
                    .collect(),
            ),
        },
    }
}

/// Recognizes single-key extended JSON wrappers.
fn tagged(object: &WireDocument) -> Option<Value> {
    if object.len() != 1 {
        return None;
    }

    let (key, value) = object.iter().next()?;

    match (key.as_str(), value) {
        (DATE_KEY, WireValue::Number(millis)) => Utc
            .timestamp_millis_opt(millis.as_i64()?)
            .single()
            .map(Value::Date),
        (BINARY_KEY, WireValue::String(encoded)) => STANDARD
            .decode(encoded)
            .ok()
            .map(|bytes| Value::Binary(Binary::generic(bytes))),
        (UUID_KEY, WireValue::String(uuid)) => uuid::Uuid::parse_str(uuid).ok().map(Value::Uuid),
        (OBJECT_ID_KEY, WireValue::String(hex)) => ObjectId::parse_str(hex).ok().map(Value::ObjectId),
        _ => None,
    }
}

/// Vectors arrive either as plain numeric arrays or as base64 packed
/// big-endian float32s. Both become plain numeric vectors.
fn vector(wire: WireValue) -> Value {
    match wire {
        WireValue::Array(items) if items.iter().all(WireValue::is_number) => Value::Vector(
            items
                .iter()
                .filter_map(WireValue::as_f64)
                .map(|v| v as f32)
                .collect(),
        ),
        WireValue::Object(object) => match object.get(BINARY_KEY) {
            Some(WireValue::String(encoded)) if object.len() == 1 => {
                match STANDARD.decode(encoded) {
                    Ok(bytes) if bytes.len() % 4 == 0 => Value::Vector(
                        bytes
                            .chunks_exact(4)
                            .map(|chunk| f32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
                            .collect(),
                    ),
                    _ => deserialize(WireValue::Object(object)),
                }
            }
            _ => deserialize(WireValue::Object(object)),
        },
        other => deserialize(other),
    }
}
