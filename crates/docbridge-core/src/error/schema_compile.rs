use super::Error;

/// Error when a schema cannot be compiled into a physical table definition.
///
/// This occurs when:
/// - A nested path is deeper than two segments
/// - A subdocument or nested path group mixes leaf types and has no UDT name
/// - A map or set element is not marked required
/// - A composite holds another composite (array of maps, etc.)
/// - A UDT body is not flat
/// - Two schema paths declare the same UDT name with different fields
#[derive(Debug)]
pub(super) struct SchemaCompile {
    path: Box<str>,
    reason: Box<str>,
}

impl std::error::Error for SchemaCompile {}

impl core::fmt::Display for SchemaCompile {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid schema at `{}`: {}", self.path, self.reason)
    }
}

impl Error {
    /// Creates a schema compile error naming the offending path.
    pub fn schema_compile(path: impl Into<String>, reason: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::SchemaCompile(SchemaCompile {
            path: path.into().into(),
            reason: reason.into().into(),
        }))
    }

    /// Returns `true` if this error is a schema compile error.
    pub fn is_schema_compile(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::SchemaCompile(_))
    }

    /// Returns the schema path named by a schema compile error.
    pub fn schema_path(&self) -> Option<&str> {
        match self.kind() {
            super::ErrorKind::SchemaCompile(err) => Some(&err.path),
            _ => None,
        }
    }
}
