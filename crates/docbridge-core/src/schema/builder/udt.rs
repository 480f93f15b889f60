use crate::{schema::db::UdtDefinition, Error, Result};

use indexmap::IndexMap;

/// UDT definitions collected while compiling one schema, keyed by name.
#[derive(Debug, Default)]
pub(super) struct UdtRegistry {
    definitions: IndexMap<String, UdtDefinition>,
}

impl UdtRegistry {
    /// Adds `definition`, referenced from `path`. Registering the same name
    /// twice is allowed only when both definitions match exactly.
    pub(super) fn register(&mut self, path: &str, definition: UdtDefinition) -> Result<()> {
        match self.definitions.get(&definition.name) {
            Some(existing) if conflicts(existing, &definition) => Err(Error::schema_compile(
                path,
                format!(
                    "UDT `{}` conflicts with an earlier definition of the same name",
                    definition.name
                ),
            )),
            Some(_) => Ok(()),
            None => {
                tracing::debug!(udt = %definition.name, path, "registered UDT");
                self.definitions
                    .insert(definition.name.clone(), definition);
                Ok(())
            }
        }
    }

    pub(super) fn len(&self) -> usize {
        self.definitions.len()
    }

    pub(super) fn into_inner(self) -> IndexMap<String, UdtDefinition> {
        self.definitions
    }
}

fn conflicts(a: &UdtDefinition, b: &UdtDefinition) -> bool {
    !a.same_definition(b)
}
