use docbridge_core::{
    schema::app::{FieldTy, Schema},
    stmt::Document,
    types::{cast_vector, Storable, ValueSet},
    Result,
};

/// Casts the top-level fields of a document being written through their
/// schema types.
///
/// Vectorize fields keep string input for server-side embedding, dimensioned
/// arrays become checked vectors, and sets are de-duplicated.
pub(crate) fn cast_document(schema: &Schema, mut doc: Document) -> Result<Document> {
    for field in schema.fields() {
        let Some(slot) = doc.get_mut(&field.path) else {
            continue;
        };

        let value = std::mem::take(slot);

        let value = match &field.ty {
            FieldTy::Primitive(primitive) => primitive.cast(value)?,
            FieldTy::Vectorize(vectorize) => vectorize.cast(&field.path, value, false)?,
            FieldTy::Array(array) if array.dimension.is_some() => {
                cast_vector(&field.path, array.dimension, value)?
            }
            FieldTy::Set(set) if !value.is_null() => {
                ValueSet::cast(field.path.clone(), set.value.ty.as_primitive(), value)?
                    .to_wire_value()
            }
            _ => value,
        };

        *slot = value;
    }

    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use docbridge_core::{
        doc,
        schema::app::{Element, Field, Primitive, Vectorize, VectorizeService},
        stmt::Value,
    };
    use pretty_assertions::assert_eq;

    fn schema() -> Schema {
        Schema::builder("items")
            .field("count", Field::primitive(Primitive::Int))
            .field("tags", Field::set(Element::new(Primitive::Text).required()))
            .field(
                "body",
                Field::new(Vectorize::new(2, VectorizeService::new("nvidia")).unwrap()),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn casts_known_fields() {
        let doc = doc! {
            "count" => "3",
            "tags" => Value::from(vec!["a", "b", "a"]),
            "body" => "embed me",
            "other" => 1i64,
        };

        let cast = cast_document(&schema(), doc).unwrap();
        assert_eq!(cast.get("count"), Some(&Value::I32(3)));
        assert_eq!(cast.get("tags"), Some(&Value::Set(vec!["a".into(), "b".into()])));
        assert_eq!(cast.get("body"), Some(&Value::from("embed me")));
        assert_eq!(cast.get("other"), Some(&Value::I64(1)));
    }

    #[test]
    fn vector_dimension_is_checked() {
        let doc = doc! { "body" => Value::from(vec![1.0, 2.0, 3.0]) };
        let err = cast_document(&schema(), doc).unwrap_err();
        assert!(err.is_validation());
    }
}
