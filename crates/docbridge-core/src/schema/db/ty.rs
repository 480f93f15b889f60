use crate::schema::app::Primitive;

use serde::Serialize;

/// Scalar column types of the remote table model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarType {
    Text,
    Double,
    Int,
    Boolean,
    Timestamp,
    Decimal,
    Varint,
    Blob,
    Uuid,
}

impl ScalarType {
    /// Maps a field primitive directly to its column type.
    pub fn from_primitive(primitive: Primitive) -> ScalarType {
        match primitive {
            Primitive::Text => ScalarType::Text,
            Primitive::Double => ScalarType::Double,
            Primitive::Int => ScalarType::Int,
            Primitive::Boolean => ScalarType::Boolean,
            Primitive::Timestamp => ScalarType::Timestamp,
            Primitive::Decimal => ScalarType::Decimal,
            Primitive::Varint => ScalarType::Varint,
            Primitive::Blob => ScalarType::Blob,
            Primitive::Uuid => ScalarType::Uuid,
            // Identifiers are stored in their hex form
            Primitive::ObjectId => ScalarType::Text,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ScalarType::Text => "text",
            ScalarType::Double => "double",
            ScalarType::Int => "int",
            ScalarType::Boolean => "boolean",
            ScalarType::Timestamp => "timestamp",
            ScalarType::Decimal => "decimal",
            ScalarType::Varint => "varint",
            ScalarType::Blob => "blob",
            ScalarType::Uuid => "uuid",
        }
    }
}
