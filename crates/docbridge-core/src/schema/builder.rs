mod table;
mod udt;

use super::{
    app::{self, FieldTy},
    db::{ScalarType, TableDefinition, UdtDefinition},
    PATH_SEPARATOR,
};
use crate::{stmt::ID_FIELD, Error, Result};

use indexmap::IndexMap;
use udt::UdtRegistry;

/// Compiles application schemas into physical table and UDT definitions.
#[derive(Debug)]
pub struct Compiler {
    /// Name of the primary key column
    primary_key: String,
}

/// Output of [`Compiler::compile`].
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledSchema {
    /// Table name, taken from the schema name
    pub name: String,

    pub table: TableDefinition,

    /// Every UDT referenced by the table, in first-reference order. UDTs must
    /// be created before the table.
    pub udts: IndexMap<String, UdtDefinition>,
}

impl Compiler {
    pub fn new() -> Compiler {
        Compiler {
            primary_key: ID_FIELD.to_string(),
        }
    }

    pub fn primary_key(&mut self, name: impl Into<String>) -> &mut Compiler {
        self.primary_key = name.into();
        self
    }

    /// Compiles `schema` into a table definition.
    ///
    /// Every violation is reported as a schema compile error naming the
    /// offending path.
    pub fn compile(&self, schema: &app::Schema) -> Result<CompiledSchema> {
        let mut udts = UdtRegistry::default();
        let table = table::BuildTable::new(self, schema, &mut udts).build()?;

        tracing::debug!(
            table = %schema.name,
            columns = table.columns.len(),
            udts = udts.len(),
            "compiled schema"
        );

        Ok(CompiledSchema {
            name: schema.name.clone(),
            table,
            udts: udts.into_inner(),
        })
    }

    /// Compiles `schema` as a standalone UDT body.
    ///
    /// The UDT is named by `name_override`, else the schema's `udt_name`
    /// option, else the schema name.
    pub fn compile_udt(
        &self,
        schema: &app::Schema,
        name_override: Option<&str>,
    ) -> Result<UdtDefinition> {
        let name = name_override
            .or(schema.options.udt_name.as_deref())
            .unwrap_or(&schema.name);

        udt_body(None, name, schema)
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Compiler::new()
    }
}

/// Compiles a flat UDT body. `prefix` is the path of the field embedding it,
/// used to name offending paths.
fn udt_body(prefix: Option<&str>, name: &str, schema: &app::Schema) -> Result<UdtDefinition> {
    let mut fields = IndexMap::new();

    for field in schema.fields() {
        let path = match prefix {
            Some(prefix) => format!("{prefix}{PATH_SEPARATOR}{}", field.path),
            None => field.path.clone(),
        };

        if field.path.contains(PATH_SEPARATOR) {
            return Err(Error::schema_compile(
                path,
                format!("UDT `{name}` must be flat; nested paths are not allowed"),
            ));
        }

        match &field.ty {
            FieldTy::Primitive(primitive) => {
                fields.insert(field.path.clone(), ScalarType::from_primitive(*primitive));
            }
            FieldTy::Embedded(_) => {
                return Err(Error::schema_compile(
                    path,
                    format!("UDT `{name}` must be flat; nested subdocuments are not allowed"),
                ));
            }
            FieldTy::Mixed => {
                return Err(Error::schema_compile(
                    path,
                    "mixed fields have no column representation",
                ));
            }
            ty => {
                return Err(Error::schema_compile(
                    path,
                    format!("UDT `{name}` may not contain {} fields", ty.kind_name()),
                ));
            }
        }
    }

    if fields.is_empty() {
        return Err(Error::schema_compile(
            prefix.unwrap_or(name),
            format!("UDT `{name}` declares no fields"),
        ));
    }

    Ok(UdtDefinition {
        name: name.to_string(),
        fields,
    })
}
