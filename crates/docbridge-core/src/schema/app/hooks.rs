//! Hooks run at the boundary with the mapping layer: one while a schema is
//! built, one before every query is dispatched.

use super::{Constraint, FieldTy, Schema};
use crate::{
    stmt::{Document, Value},
    wire::{VECTORIZE_KEY, VECTOR_KEY},
};

/// Projection key that selects every field, hidden ones included.
pub const SELECT_ALL: &str = "*";

/// Attaches a length validator to every dimensioned array and vectorize
/// field that does not already carry one.
pub fn attach_dimension_validators(schema: &mut Schema) {
    for field in schema.fields_mut() {
        let Some(dimension) = field.vector_dimension() else {
            continue;
        };

        let constraint = Constraint::Dimension(dimension);
        if !field.constraints.contains(&constraint) {
            field.constraints.push(constraint);
        }
    }
}

/// Returns `true` for fields the remote API leaves out of query results
/// unless they are projected explicitly.
pub fn is_hidden_by_default(path: &str, ty: &FieldTy) -> bool {
    path == VECTOR_KEY
        || path == VECTORIZE_KEY
        || matches!(ty, FieldTy::Vectorize(_))
        || matches!(ty, FieldTy::Array(array) if array.dimension.is_some())
}

/// Adds hidden-by-default fields that the schema marks `select: true` to a
/// query projection.
///
/// An absent or empty projection becomes a select-all projection so that
/// the rest of the document still comes back. An inclusion projection gets
/// the field added. Exclusion projections and projections that already
/// mention the field are left alone.
pub fn augment_projection(schema: &Schema, projection: &mut Option<Document>) {
    for field in schema.fields() {
        if field.select != Some(true) || !is_hidden_by_default(&field.path, &field.ty) {
            continue;
        }

        match projection {
            None => {
                *projection = Some(crate::doc! { SELECT_ALL => 1i32 });
            }
            Some(projection) if projection.is_empty() => {
                projection.insert(SELECT_ALL, 1i32);
            }
            Some(projection) => {
                if projection.contains_key(&field.path) || projection.contains_key(SELECT_ALL) {
                    continue;
                }

                if is_inclusion(projection) {
                    projection.insert(field.path.clone(), 1i32);
                }
            }
        }
    }
}

fn is_inclusion(projection: &Document) -> bool {
    projection.iter().any(|(key, value)| {
        key != crate::stmt::ID_FIELD
            && match value {
                Value::Bool(v) => *v,
                Value::I32(v) => *v != 0,
                Value::I64(v) => *v != 0,
                // `$slice` and similar operators do not decide the style
                _ => false,
            }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{doc, schema::app::Field};

    fn schema() -> Schema {
        Schema::builder("items")
            .field("name", Field::text())
            .field("embedding", Field::vector(3).select(true))
            .build()
            .unwrap()
    }

    #[test]
    fn absent_projection_selects_everything() {
        let mut projection = None;
        augment_projection(&schema(), &mut projection);
        assert_eq!(projection, Some(doc! { "*" => 1i32 }));
    }

    #[test]
    fn inclusion_projection_gains_field() {
        let mut projection = Some(doc! { "name" => 1i32 });
        augment_projection(&schema(), &mut projection);
        assert_eq!(
            projection,
            Some(doc! { "name" => 1i32, "embedding" => 1i32 })
        );
    }

    #[test]
    fn exclusion_projection_untouched() {
        let mut projection = Some(doc! { "name" => 0i32 });
        augment_projection(&schema(), &mut projection);
        assert_eq!(projection, Some(doc! { "name" => 0i32 }));
    }

    #[test]
    fn unselected_vector_is_not_added() {
        let schema = Schema::builder("items")
            .field("embedding", Field::vector(3))
            .build()
            .unwrap();
        let mut projection = None;
        augment_projection(&schema, &mut projection);
        assert_eq!(projection, None);
    }
}
