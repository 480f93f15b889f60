use super::ScalarType;

use indexmap::IndexMap;
use serde::{ser::SerializeMap, Serialize, Serializer};

/// A named, flat field set stored as a user-defined type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UdtDefinition {
    pub name: String,
    pub fields: IndexMap<String, ScalarType>,
}

impl UdtDefinition {
    /// Returns `true` if `other` declares exactly the same fields, in the
    /// same order, with the same types.
    pub fn same_definition(&self, other: &UdtDefinition) -> bool {
        self.fields.len() == other.fields.len()
            && self
                .fields
                .iter()
                .zip(other.fields.iter())
                .all(|(a, b)| a == b)
    }

    pub fn to_wire(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// Serializes as the create-type `definition`: `{"fields": {name: {"type": ..}}}`.
impl Serialize for UdtDefinition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        struct Fields<'a>(&'a IndexMap<String, ScalarType>);

        impl Serialize for Fields<'_> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(Some(self.0.len()))?;
                for (name, ty) in self.0 {
                    map.serialize_entry(name, &serde_json::json!({ "type": ty.name() }))?;
                }
                map.end()
            }
        }

        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("fields", &Fields(&self.fields))?;
        map.end()
    }
}
