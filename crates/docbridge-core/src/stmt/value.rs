use super::{BigDecimal, BigInt, Binary, CustomValue, Document, ObjectId};

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use uuid::Uuid;

/// A mapping-layer value.
///
/// This is the native side of the translation layer. [`crate::wire`]
/// converts it to and from the remote API's JSON representation.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum Value {
    /// Null value
    #[default]
    Null,

    /// Boolean value
    Bool(bool),

    /// Signed 32-bit integer
    I32(i32),

    /// Signed 64-bit integer
    I64(i64),

    /// Double-precision float
    F64(f64),

    /// String value
    String(String),

    /// Document identifier
    ObjectId(ObjectId),

    /// UUID
    Uuid(Uuid),

    /// Arbitrary-precision decimal
    Decimal(BigDecimal),

    /// Arbitrary-precision integer
    BigInt(BigInt),

    /// Tagged binary payload
    Binary(Binary),

    /// Instant in time, millisecond precision on the wire
    Date(DateTime<Utc>),

    /// Ordered list
    Array(Vec<Value>),

    /// Embedded document
    Document(Document),

    /// Native key/value map. Never crosses the wire as-is.
    Map(IndexMap<String, Value>),

    /// Collection of unique values
    Set(Vec<Value>),

    /// Numeric vector
    Vector(Vec<f32>),

    /// A value carrying its own wire conversion hook
    Custom(CustomValue),
}

impl Value {
    pub const fn null() -> Self {
        Self::Null
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub const fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::I32(_) | Self::I64(_) | Self::F64(_) | Self::Decimal(_) | Self::BigInt(_)
        )
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::I32(v) => Some(*v as i64),
            Self::I64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::I32(v) => Some(*v as f64),
            Self::I64(v) => Some(*v as f64),
            Self::F64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_document(&self) -> Option<&Document> {
        match self {
            Self::Document(doc) => Some(doc),
            _ => None,
        }
    }

    pub fn as_document_mut(&mut self) -> Option<&mut Document> {
        match self {
            Self::Document(doc) => Some(doc),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(items) | Self::Set(items) => Some(items),
            _ => None,
        }
    }

    /// Short name of the value kind, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "Null",
            Self::Bool(_) => "Bool",
            Self::I32(_) => "I32",
            Self::I64(_) => "I64",
            Self::F64(_) => "F64",
            Self::String(_) => "String",
            Self::ObjectId(_) => "ObjectId",
            Self::Uuid(_) => "Uuid",
            Self::Decimal(_) => "Decimal",
            Self::BigInt(_) => "BigInt",
            Self::Binary(_) => "Binary",
            Self::Date(_) => "Date",
            Self::Array(_) => "Array",
            Self::Document(_) => "Document",
            Self::Map(_) => "Map",
            Self::Set(_) => "Set",
            Self::Vector(_) => "Vector",
            Self::Custom(_) => "Custom",
        }
    }
}

impl From<bool> for Value {
    fn from(src: bool) -> Self {
        Self::Bool(src)
    }
}

impl From<i32> for Value {
    fn from(src: i32) -> Self {
        Self::I32(src)
    }
}

impl From<i64> for Value {
    fn from(src: i64) -> Self {
        Self::I64(src)
    }
}

impl From<f64> for Value {
    fn from(src: f64) -> Self {
        Self::F64(src)
    }
}

impl From<String> for Value {
    fn from(src: String) -> Self {
        Self::String(src)
    }
}

impl From<&String> for Value {
    fn from(src: &String) -> Self {
        Self::String(src.clone())
    }
}

impl From<&str> for Value {
    fn from(src: &str) -> Self {
        Self::String(src.to_string())
    }
}

impl From<ObjectId> for Value {
    fn from(src: ObjectId) -> Self {
        Self::ObjectId(src)
    }
}

impl From<Uuid> for Value {
    fn from(src: Uuid) -> Self {
        Self::Uuid(src)
    }
}

impl From<BigDecimal> for Value {
    fn from(src: BigDecimal) -> Self {
        Self::Decimal(src)
    }
}

impl From<BigInt> for Value {
    fn from(src: BigInt) -> Self {
        Self::BigInt(src)
    }
}

impl From<Binary> for Value {
    fn from(src: Binary) -> Self {
        Self::Binary(src)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(src: DateTime<Utc>) -> Self {
        Self::Date(src)
    }
}

impl From<Document> for Value {
    fn from(src: Document) -> Self {
        Self::Document(src)
    }
}

impl From<CustomValue> for Value {
    fn from(src: CustomValue) -> Self {
        Self::Custom(src)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(src: Vec<T>) -> Self {
        Self::Array(src.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(src: Option<T>) -> Self {
        match src {
            Some(value) => value.into(),
            None => Self::Null,
        }
    }
}
