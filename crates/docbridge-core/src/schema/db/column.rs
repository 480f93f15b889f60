use super::ScalarType;
use crate::types::VectorizeService;

use serde::{ser::SerializeMap, Serialize, Serializer};

/// Definition of one physical column.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Scalar(ScalarType),
    List(ValueType),
    Set(ValueType),

    /// Maps always have text keys
    Map(ValueType),
    Vector {
        dimension: usize,
        service: Option<VectorizeService>,
    },
    Udt(String),
}

/// Element or value type of a collection column.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueType {
    Scalar(ScalarType),
    Udt(String),
}

impl Column {
    pub fn type_name(&self) -> &'static str {
        match self {
            Column::Scalar(scalar) => scalar.name(),
            Column::List(_) => "list",
            Column::Set(_) => "set",
            Column::Map(_) => "map",
            Column::Vector { .. } => "vector",
            Column::Udt(_) => "userDefined",
        }
    }

    pub fn value_type(&self) -> Option<&ValueType> {
        match self {
            Column::List(value) | Column::Set(value) | Column::Map(value) => Some(value),
            _ => None,
        }
    }
}

impl Serialize for Column {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", self.type_name())?;

        match self {
            Column::Scalar(_) => {}
            Column::List(value) | Column::Set(value) => {
                map.serialize_entry("valueType", value)?;
            }
            Column::Map(value) => {
                map.serialize_entry("keyType", ScalarType::Text.name())?;
                map.serialize_entry("valueType", value)?;
            }
            Column::Vector { dimension, service } => {
                map.serialize_entry("dimension", dimension)?;
                if let Some(service) = service {
                    map.serialize_entry("service", service)?;
                }
            }
            Column::Udt(name) => {
                map.serialize_entry("udtName", name)?;
            }
        }

        map.end()
    }
}

impl Serialize for ValueType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ValueType::Scalar(scalar) => serializer.serialize_str(scalar.name()),
            ValueType::Udt(name) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "userDefined")?;
                map.serialize_entry("udtName", name)?;
                map.end()
            }
        }
    }
}
