use crate::{
    stmt::{BigDecimal, BigInt, ObjectId, Value},
    Error, Result,
};

use chrono::{DateTime, TimeZone, Utc};
use std::str::FromStr;

/// Scalar field kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Text,
    Double,
    Int,
    Boolean,
    Timestamp,
    Decimal,

    /// Arbitrary-precision integer
    Varint,

    /// Opaque binary
    Blob,
    Uuid,

    /// Document identifier, stored as text
    ObjectId,
}

impl Primitive {
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            Primitive::Double | Primitive::Int | Primitive::Decimal | Primitive::Varint
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            Primitive::Text => "text",
            Primitive::Double => "double",
            Primitive::Int => "int",
            Primitive::Boolean => "boolean",
            Primitive::Timestamp => "timestamp",
            Primitive::Decimal => "decimal",
            Primitive::Varint => "varint",
            Primitive::Blob => "blob",
            Primitive::Uuid => "uuid",
            Primitive::ObjectId => "objectId",
        }
    }

    /// Casts a value to this kind. `Null` stays `Null`.
    pub fn cast(self, value: Value) -> Result<Value> {
        if value.is_null() {
            return Ok(Value::Null);
        }

        match (self, value) {
            (Primitive::Text, Value::String(v)) => Ok(Value::String(v)),
            (Primitive::Text, Value::I32(v)) => Ok(Value::String(v.to_string())),
            (Primitive::Text, Value::I64(v)) => Ok(Value::String(v.to_string())),
            (Primitive::Text, Value::F64(v)) => Ok(Value::String(v.to_string())),
            (Primitive::Text, Value::Bool(v)) => Ok(Value::String(v.to_string())),
            (Primitive::Text, Value::ObjectId(v)) => Ok(Value::String(v.to_hex())),

            (Primitive::Double, Value::F64(v)) => Ok(Value::F64(v)),
            (Primitive::Double, Value::I32(v)) => Ok(Value::F64(v as f64)),
            (Primitive::Double, Value::I64(v)) => Ok(Value::F64(v as f64)),
            (Primitive::Double, Value::String(v)) => f64::from_str(v.trim())
                .map(Value::F64)
                .map_err(|_| Error::type_conversion(Value::String(v), "double")),

            (Primitive::Int, Value::I32(v)) => Ok(Value::I32(v)),
            (Primitive::Int, Value::I64(v)) => i32::try_from(v)
                .map(Value::I32)
                .map_err(|_| Error::type_conversion(Value::I64(v), "int")),
            (Primitive::Int, Value::F64(v)) if v.fract() == 0.0 && v.abs() <= i32::MAX as f64 => {
                Ok(Value::I32(v as i32))
            }
            (Primitive::Int, Value::String(v)) => i32::from_str(v.trim())
                .map(Value::I32)
                .map_err(|_| Error::type_conversion(Value::String(v), "int")),

            (Primitive::Boolean, Value::Bool(v)) => Ok(Value::Bool(v)),
            (Primitive::Boolean, Value::String(v)) => match v.as_str() {
                "true" => Ok(Value::Bool(true)),
                "false" => Ok(Value::Bool(false)),
                _ => Err(Error::type_conversion(Value::String(v), "boolean")),
            },

            (Primitive::Timestamp, Value::Date(v)) => Ok(Value::Date(v)),
            (Primitive::Timestamp, Value::I64(millis)) => Utc
                .timestamp_millis_opt(millis)
                .single()
                .map(Value::Date)
                .ok_or_else(|| Error::type_conversion(Value::I64(millis), "timestamp")),
            (Primitive::Timestamp, Value::String(v)) => DateTime::parse_from_rfc3339(&v)
                .map(|date| Value::Date(date.with_timezone(&Utc)))
                .map_err(|_| Error::type_conversion(Value::String(v), "timestamp")),

            (Primitive::Decimal, Value::Decimal(v)) => Ok(Value::Decimal(v)),
            (Primitive::Decimal, Value::I32(v)) => Ok(Value::Decimal(BigDecimal::from(v))),
            (Primitive::Decimal, Value::I64(v)) => Ok(Value::Decimal(BigDecimal::from(v))),
            (Primitive::Decimal, Value::F64(v)) => BigDecimal::try_from(v)
                .map(Value::Decimal)
                .map_err(|_| Error::type_conversion(Value::F64(v), "decimal")),
            (Primitive::Decimal, Value::String(v)) => BigDecimal::from_str(v.trim())
                .map(Value::Decimal)
                .map_err(|_| Error::type_conversion(Value::String(v), "decimal")),

            (Primitive::Varint, Value::BigInt(v)) => Ok(Value::BigInt(v)),
            (Primitive::Varint, Value::I32(v)) => Ok(Value::BigInt(BigInt::from(v))),
            (Primitive::Varint, Value::I64(v)) => Ok(Value::BigInt(BigInt::from(v))),
            (Primitive::Varint, Value::String(v)) => BigInt::from_str(v.trim())
                .map(Value::BigInt)
                .map_err(|_| Error::type_conversion(Value::String(v), "varint")),

            (Primitive::Blob, Value::Binary(v)) => Ok(Value::Binary(v)),

            (Primitive::Uuid, Value::Uuid(v)) => Ok(Value::Uuid(v)),
            (Primitive::Uuid, Value::Binary(v)) => match v.as_uuid() {
                Some(uuid) => Ok(Value::Uuid(uuid)),
                None => Err(Error::type_conversion(Value::Binary(v), "uuid")),
            },
            (Primitive::Uuid, Value::String(v)) => uuid::Uuid::parse_str(&v)
                .map(Value::Uuid)
                .map_err(|_| Error::type_conversion(Value::String(v), "uuid")),

            (Primitive::ObjectId, Value::ObjectId(v)) => Ok(Value::ObjectId(v)),
            (Primitive::ObjectId, Value::String(v)) => ObjectId::parse_str(&v).map(Value::ObjectId),

            (primitive, value) => Err(Error::type_conversion(value, primitive.name())),
        }
    }
}
