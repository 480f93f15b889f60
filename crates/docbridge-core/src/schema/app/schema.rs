use super::{hooks, Field, FieldTy};
use crate::{stmt::Document, Error, Result};

use indexmap::IndexMap;

/// Declarative description of a document's fields, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub name: String,
    fields: IndexMap<String, Field>,
    pub options: SchemaOptions,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaOptions {
    /// Name of the revision counter field, when the schema keeps one.
    pub version_key: Option<String>,

    /// UDT name used when this schema is embedded in another one.
    pub udt_name: Option<String>,
}

#[derive(Debug)]
pub struct SchemaBuilder {
    name: String,
    fields: Vec<Field>,
    options: SchemaOptions,
}

/// Default name of the revision counter field.
pub const DEFAULT_VERSION_KEY: &str = "__v";

impl Schema {
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            name: name.into(),
            fields: vec![],
            options: SchemaOptions::default(),
        }
    }

    pub fn field(&self, path: &str) -> Option<&Field> {
        self.fields.get(path)
    }

    pub fn field_mut(&mut self, path: &str) -> Option<&mut Field> {
        self.fields.get_mut(path)
    }

    pub fn fields(&self) -> impl ExactSizeIterator<Item = &Field> {
        self.fields.values()
    }

    pub(crate) fn fields_mut(&mut self) -> impl Iterator<Item = &mut Field> {
        self.fields.values_mut()
    }

    /// Checks a document against every field's requirements and constraints.
    ///
    /// Returns the first failure, naming the offending path.
    pub fn validate(&self, doc: &Document) -> Result<()> {
        for field in self.fields.values() {
            let value = doc.get_path(&field.path);

            if field.required && value.map_or(true, |value| value.is_null()) {
                return Err(Error::validation_required(&field.path));
            }

            let Some(value) = value else {
                continue;
            };

            for constraint in &field.constraints {
                constraint.check(&field.path, value)?;
            }

            if let (FieldTy::Embedded(embedded), crate::stmt::Value::Document(sub)) =
                (&field.ty, value)
            {
                embedded
                    .schema
                    .validate(sub)
                    .map_err(|err| err.context(crate::err!("in `{}`", field.path)))?;
            }
        }

        Ok(())
    }
}

impl SchemaBuilder {
    pub fn field(mut self, path: impl Into<String>, mut field: Field) -> SchemaBuilder {
        field.path = path.into();
        self.fields.push(field);
        self
    }

    /// Enables the revision counter under the default name.
    pub fn versioned(self) -> SchemaBuilder {
        self.version_key(DEFAULT_VERSION_KEY)
    }

    pub fn version_key(mut self, name: impl Into<String>) -> SchemaBuilder {
        self.options.version_key = Some(name.into());
        self
    }

    pub fn udt_name(mut self, name: impl Into<String>) -> SchemaBuilder {
        self.options.udt_name = Some(name.into());
        self
    }

    /// Finishes the schema and runs the schema-build hooks.
    pub fn build(self) -> Result<Schema> {
        let mut fields = IndexMap::with_capacity(self.fields.len());

        for field in self.fields {
            if field.path.is_empty() {
                return Err(Error::invalid_option("path", "field path must not be empty"));
            }

            if let FieldTy::Array(array) = &field.ty {
                if array.dimension == Some(0) {
                    return Err(Error::invalid_option(
                        "dimension",
                        format!("`{}`: dimension must be a positive integer", field.path),
                    ));
                }
            }

            if fields.contains_key(&field.path) {
                return Err(Error::invalid_option(
                    "path",
                    format!("`{}` is declared more than once", field.path),
                ));
            }

            fields.insert(field.path.clone(), field);
        }

        let mut schema = Schema {
            name: self.name,
            fields,
            options: self.options,
        };

        hooks::attach_dimension_validators(&mut schema);

        Ok(schema)
    }
}
