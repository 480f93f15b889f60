mod constraint;
pub use constraint::Constraint;

mod field;
pub use field::{Element, Embedded, Field, FieldArray, FieldMap, FieldSet, FieldTy};

pub mod hooks;

mod primitive;
pub use primitive::Primitive;

mod schema;
pub use schema::{Schema, SchemaBuilder, SchemaOptions};

pub use crate::types::{Vectorize, VectorizeService};
