use super::{udt_body, Compiler, UdtRegistry};
use crate::{
    schema::{
        app::{self, Element, Embedded, FieldTy},
        db::{Column, ScalarType, TableDefinition, ValueType},
        MAX_PATH_DEPTH, PATH_SEPARATOR,
    },
    Error, Result,
};

use indexmap::{IndexMap, IndexSet};

/// State for compiling a single schema into a table.
pub(super) struct BuildTable<'a> {
    compiler: &'a Compiler,

    schema: &'a app::Schema,

    /// UDTs referenced so far
    udts: &'a mut UdtRegistry,

    /// Columns in emit order
    columns: IndexMap<String, Column>,

    /// Nested path groups, keyed by their first segment. Each member is
    /// `(path, type)`.
    groups: IndexMap<String, Vec<(String, ScalarType)>>,
}

/// Kind of map column a set of leaf types collapses into. Changes the
/// wording of compile errors.
#[derive(Clone, Copy)]
enum MapSource {
    Subdocument,
    NestedPaths,
}

impl<'a> BuildTable<'a> {
    pub(super) fn new(
        compiler: &'a Compiler,
        schema: &'a app::Schema,
        udts: &'a mut UdtRegistry,
    ) -> BuildTable<'a> {
        BuildTable {
            compiler,
            schema,
            udts,
            columns: IndexMap::new(),
            groups: IndexMap::new(),
        }
    }

    pub(super) fn build(mut self) -> Result<TableDefinition> {
        self.columns.insert(
            self.compiler.primary_key.clone(),
            Column::Scalar(ScalarType::Text),
        );

        if let Some(version_key) = &self.schema.options.version_key {
            self.columns
                .insert(version_key.clone(), Column::Scalar(ScalarType::Int));
        }

        for field in self.schema.fields() {
            if field.path == self.compiler.primary_key {
                continue;
            }

            if field.path.contains(PATH_SEPARATOR) {
                self.nested_path(field)?;
                continue;
            }

            let column = self.column(&field.path, &field.ty)?;
            self.columns.insert(field.path.clone(), column);
        }

        for (parent, members) in std::mem::take(&mut self.groups) {
            if self.columns.contains_key(&parent) {
                return Err(Error::schema_compile(
                    parent,
                    "declared both as a field and as a nested path group",
                ));
            }

            let types = members.iter().map(|(_, ty)| *ty).collect::<IndexSet<_>>();
            let column = collapse_to_map(&parent, types, MapSource::NestedPaths)?;
            self.columns.insert(parent, column);
        }

        Ok(TableDefinition {
            primary_key: self.compiler.primary_key.clone(),
            columns: self.columns,
        })
    }

    fn nested_path(&mut self, field: &app::Field) -> Result<()> {
        let segments = field.path.split(PATH_SEPARATOR).collect::<Vec<_>>();

        if segments.len() > MAX_PATH_DEPTH {
            return Err(Error::schema_compile(
                &field.path,
                format!("nested paths may have at most {MAX_PATH_DEPTH} segments"),
            ));
        }

        let parent = segments[0];

        // Paths below a declared subdocument belong to that subdocument
        if let Some(FieldTy::Embedded(_)) = self.schema.field(parent).map(|parent| &parent.ty) {
            return Ok(());
        }

        let FieldTy::Primitive(primitive) = &field.ty else {
            return Err(Error::schema_compile(
                &field.path,
                format!(
                    "nested paths must be primitive, found {}",
                    field.ty.kind_name()
                ),
            ));
        };

        self.groups
            .entry(parent.to_string())
            .or_default()
            .push((field.path.clone(), ScalarType::from_primitive(*primitive)));

        Ok(())
    }

    fn column(&mut self, path: &str, ty: &FieldTy) -> Result<Column> {
        Ok(match ty {
            FieldTy::Primitive(primitive) => Column::Scalar(ScalarType::from_primitive(*primitive)),
            FieldTy::Array(array) => match array.dimension {
                Some(dimension) => {
                    match array.element.ty.as_primitive() {
                        Some(primitive) if primitive.is_numeric() => {}
                        _ => {
                            return Err(Error::schema_compile(
                                path,
                                "vector elements must be numeric",
                            ))
                        }
                    }

                    Column::Vector {
                        dimension,
                        service: None,
                    }
                }
                None => Column::List(self.value_type(path, &array.element, "array")?),
            },
            FieldTy::Vectorize(vectorize) => Column::Vector {
                dimension: vectorize.dimension(),
                service: Some(vectorize.service().clone()),
            },
            FieldTy::Embedded(embedded) => match self.udt(path, embedded)? {
                Some(name) => Column::Udt(name),
                None => self.subdocument_map(path, &embedded.schema)?,
            },
            FieldTy::Map(map) => {
                require_element(path, &map.value, "map value")?;
                Column::Map(self.value_type(path, &map.value, "map")?)
            }
            FieldTy::Set(set) => {
                require_element(path, &set.value, "set element")?;
                Column::Set(self.value_type(path, &set.value, "set")?)
            }
            FieldTy::Mixed => {
                return Err(Error::schema_compile(
                    path,
                    "mixed fields have no column representation",
                ))
            }
        })
    }

    /// Resolves the element type of an array, map or set column.
    fn value_type(
        &mut self,
        path: &str,
        element: &Element,
        container: &'static str,
    ) -> Result<ValueType> {
        match &element.ty {
            FieldTy::Primitive(primitive) => {
                Ok(ValueType::Scalar(ScalarType::from_primitive(*primitive)))
            }
            FieldTy::Embedded(embedded) => match self.udt(path, embedded)? {
                Some(name) => Ok(ValueType::Udt(name)),
                None => Err(Error::schema_compile(
                    path,
                    format!("{container} of subdocuments requires a UDT name"),
                )),
            },
            ty => Err(Error::schema_compile(
                path,
                format!("{container} of {} is not supported", ty.kind_name()),
            )),
        }
    }

    /// Resolves the UDT name of an embedded schema and registers its body.
    ///
    /// A field-level name wins over the embedded schema's own option.
    fn udt(&mut self, path: &str, embedded: &Embedded) -> Result<Option<String>> {
        let Some(name) = embedded
            .udt_name
            .as_deref()
            .or(embedded.schema.options.udt_name.as_deref())
        else {
            return Ok(None);
        };

        let definition = udt_body(Some(path), name, &embedded.schema)?;
        self.udts.register(path, definition)?;

        Ok(Some(name.to_string()))
    }

    fn subdocument_map(&self, path: &str, schema: &app::Schema) -> Result<Column> {
        let mut types = IndexSet::new();

        for field in schema.fields() {
            match &field.ty {
                FieldTy::Primitive(primitive) => {
                    types.insert(ScalarType::from_primitive(*primitive));
                }
                ty => {
                    return Err(Error::schema_compile(
                        format!("{path}{PATH_SEPARATOR}{}", field.path),
                        format!(
                            "subdocuments without a UDT name may only hold primitives, found {}",
                            ty.kind_name()
                        ),
                    ))
                }
            }
        }

        collapse_to_map(path, types, MapSource::Subdocument)
    }
}

fn require_element(path: &str, element: &Element, what: &str) -> Result<()> {
    if element.required {
        Ok(())
    } else {
        Err(Error::schema_compile(path, format!("{what} must be required")))
    }
}

/// Collapses a set of leaf types into a single map column.
fn collapse_to_map(path: &str, types: IndexSet<ScalarType>, source: MapSource) -> Result<Column> {
    let what = match source {
        MapSource::Subdocument => "subdocument fields",
        MapSource::NestedPaths => "nested paths",
    };

    let ty = match types.len() {
        0 => return Err(Error::schema_compile(path, format!("{what} declare no fields"))),
        1 => types[0],
        _ => {
            let names = types.iter().map(|ty| ty.name()).collect::<Vec<_>>();
            let hint = match source {
                MapSource::Subdocument => "; set a UDT name to store them",
                MapSource::NestedPaths => "",
            };
            return Err(Error::schema_compile(
                path,
                format!(
                    "{what} have different data types ({}){hint}",
                    names.join(", ")
                ),
            ));
        }
    };

    if ty == ScalarType::Blob {
        return Err(Error::schema_compile(
            path,
            "blob values cannot be stored in a map column",
        ));
    }

    Ok(Column::Map(ValueType::Scalar(ty)))
}
