use super::{Constraint, Primitive, Schema};
use crate::types::Vectorize;

/// A declared field of a [`Schema`].
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Field path. A `.` separates nested segments.
    pub path: String,

    /// The field's type
    pub ty: FieldTy,

    /// True if the value must be present and non-null
    pub required: bool,

    /// Projection default. `Some(false)` keeps the field out of query
    /// results unless it is explicitly requested.
    pub select: Option<bool>,

    /// Value-level checks run by [`Schema::validate`]
    pub constraints: Vec<Constraint>,
}

/// Field types, closed over every kind the compiler understands.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldTy {
    Primitive(Primitive),
    Array(FieldArray),
    Map(FieldMap),
    Set(FieldSet),
    Embedded(Embedded),
    Vectorize(Vectorize),

    /// Untyped value. Has no physical representation.
    Mixed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldArray {
    pub element: Box<Element>,

    /// When set, the array is a fixed-length numeric vector.
    pub dimension: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldMap {
    pub value: Box<Element>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldSet {
    pub value: Box<Element>,
}

/// Element type of an array, map or set.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub ty: FieldTy,
    pub required: bool,
}

/// A subdocument with its own schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Embedded {
    pub schema: Box<Schema>,

    /// Explicit UDT name. Takes precedence over the subschema's own
    /// `udt_name` option.
    pub udt_name: Option<String>,
}

impl Field {
    pub fn new(ty: impl Into<FieldTy>) -> Field {
        Field {
            path: String::new(),
            ty: ty.into(),
            required: false,
            select: None,
            constraints: vec![],
        }
    }

    pub fn primitive(primitive: Primitive) -> Field {
        Field::new(FieldTy::Primitive(primitive))
    }

    pub fn text() -> Field {
        Field::primitive(Primitive::Text)
    }

    pub fn array(element: Element) -> Field {
        Field::new(FieldTy::Array(FieldArray {
            element: Box::new(element),
            dimension: None,
        }))
    }

    /// A numeric array of fixed length.
    pub fn vector(dimension: usize) -> Field {
        Field::new(FieldTy::Array(FieldArray {
            element: Box::new(Element::new(Primitive::Double)),
            dimension: Some(dimension),
        }))
    }

    pub fn map(value: Element) -> Field {
        Field::new(FieldTy::Map(FieldMap {
            value: Box::new(value),
        }))
    }

    pub fn set(value: Element) -> Field {
        Field::new(FieldTy::Set(FieldSet {
            value: Box::new(value),
        }))
    }

    pub fn embedded(schema: Schema) -> Field {
        Field::new(FieldTy::Embedded(Embedded {
            schema: Box::new(schema),
            udt_name: None,
        }))
    }

    pub fn required(mut self) -> Field {
        self.required = true;
        self
    }

    pub fn select(mut self, select: bool) -> Field {
        self.select = Some(select);
        self
    }

    /// Sets the dimension option on an array field.
    pub fn dimension(mut self, dimension: usize) -> Field {
        if let FieldTy::Array(array) = &mut self.ty {
            array.dimension = Some(dimension);
        }
        self
    }

    /// Sets the UDT name option on an embedded field, or on the embedded
    /// element of an array, map or set.
    pub fn udt_name(mut self, name: impl Into<String>) -> Field {
        let name = name.into();
        match &mut self.ty {
            FieldTy::Embedded(embedded) => embedded.udt_name = Some(name),
            FieldTy::Array(FieldArray { element, .. })
            | FieldTy::Map(FieldMap { value: element })
            | FieldTy::Set(FieldSet { value: element }) => {
                if let FieldTy::Embedded(embedded) = &mut element.ty {
                    embedded.udt_name = Some(name);
                }
            }
            _ => {}
        }
        self
    }

    /// Returns the declared vector dimension, for dimensioned arrays and
    /// vectorize fields.
    pub fn vector_dimension(&self) -> Option<usize> {
        match &self.ty {
            FieldTy::Array(array) => array.dimension,
            FieldTy::Vectorize(vectorize) => Some(vectorize.dimension()),
            _ => None,
        }
    }
}

impl Element {
    pub fn new(ty: impl Into<FieldTy>) -> Element {
        Element {
            ty: ty.into(),
            required: false,
        }
    }

    pub fn required(mut self) -> Element {
        self.required = true;
        self
    }
}

impl FieldTy {
    pub fn as_primitive(&self) -> Option<Primitive> {
        match self {
            FieldTy::Primitive(primitive) => Some(*primitive),
            _ => None,
        }
    }

    /// Short name of the kind, used in compile errors.
    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldTy::Primitive(_) => "primitive",
            FieldTy::Array(_) => "array",
            FieldTy::Map(_) => "map",
            FieldTy::Set(_) => "set",
            FieldTy::Embedded(_) => "subdocument",
            FieldTy::Vectorize(_) => "vectorize",
            FieldTy::Mixed => "mixed",
        }
    }
}

impl From<Primitive> for FieldTy {
    fn from(primitive: Primitive) -> Self {
        FieldTy::Primitive(primitive)
    }
}

impl From<Vectorize> for FieldTy {
    fn from(vectorize: Vectorize) -> Self {
        FieldTy::Vectorize(vectorize)
    }
}

impl From<Schema> for FieldTy {
    fn from(schema: Schema) -> Self {
        FieldTy::Embedded(Embedded {
            schema: Box::new(schema),
            udt_name: None,
        })
    }
}
